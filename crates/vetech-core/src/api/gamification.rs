use std::future::Future;

use futures::future::join_all;
use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::SessionPersistence;
use crate::http::{path_segment, ApiClient, ApiResult};
use crate::models::{
    Goal, GoalFilter, Pet, PetStatistics, PointEntry, PointsFilter, PointsTotals, RankingPeriod,
    RedeemedReward, RedemptionStatus, Reward, RewardFilter, Statistics, StatisticsPeriod,
};

const GOALS_ROUTE: &str = "/api/v1/gamificacao/metas";
const REWARDS_ROUTE: &str = "/api/v1/gamificacao/recompensas";
const RANKING_ROUTE: &str = "/api/v1/gamificacao/ranking";

pub struct GamificationApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> GamificationApi<'_, S> {
    pub async fn goals(&self, filter: &GoalFilter) -> Vec<Goal> {
        let result = self.client.get_list(GOALS_ROUTE, &filter.to_query()).await;
        or_empty(result, "goals")
    }

    pub async fn points(&self, animal_id: &str, filter: &PointsFilter) -> Vec<PointEntry> {
        let result = self
            .client
            .get_list(&animal_route(animal_id, "pontuacoes"), &filter.to_query())
            .await;
        or_empty(result, "points history")
    }

    pub async fn rewards(&self, filter: &RewardFilter) -> Vec<Reward> {
        let result = self
            .client
            .get_list(REWARDS_ROUTE, &filter.to_query())
            .await;
        or_empty(result, "rewards")
    }

    /// Redeems a reward. Not retried; the backend message is kept on failure.
    pub async fn redeem(
        &self,
        animal_id: &str,
        reward_id: &str,
        notes: Option<&str>,
    ) -> ApiResult<RedeemedReward> {
        let body = json!({ "recompensa_id": reward_id, "observacoes": notes });
        let redeemed: RedeemedReward = self
            .client
            .send_json(Method::POST, &animal_route(animal_id, "recompensas"), &body)
            .await?;
        tracing::info!(animal_id, reward_id, "Reward redeemed");
        Ok(redeemed)
    }

    pub async fn redeemed(
        &self,
        animal_id: &str,
        status: Option<RedemptionStatus>,
    ) -> Vec<RedeemedReward> {
        let query = status
            .map(|status| vec![("status", status.as_str().to_string())])
            .unwrap_or_default();
        let result = self
            .client
            .get_list(&animal_route(animal_id, "recompensas"), &query)
            .await;
        or_empty(result, "redeemed rewards")
    }

    pub async fn statistics(
        &self,
        animal_id: &str,
        period: Option<StatisticsPeriod>,
    ) -> Option<Statistics> {
        let query = period
            .map(|period| vec![("periodo", period.as_str().to_string())])
            .unwrap_or_default();
        match self
            .client
            .get_json(&animal_route(animal_id, "estatisticas"), &query)
            .await
        {
            Ok(statistics) => Some(statistics),
            Err(error) => {
                tracing::warn!(animal_id, "Failed to fetch statistics: {}", error);
                None
            }
        }
    }

    /// Entries come back as loosely shaped JSON.
    pub async fn ranking(&self, period: Option<RankingPeriod>) -> Vec<Value> {
        let query = period
            .map(|period| vec![("periodo", period.as_str().to_string())])
            .unwrap_or_default();
        let result = self.client.get_list(RANKING_ROUTE, &query).await;
        or_empty(result, "ranking")
    }

    /// Fetches statistics for every pet at once and sums their points.
    pub async fn statistics_for_all(
        &self,
        pets: &[Pet],
        period: Option<StatisticsPeriod>,
    ) -> (Vec<PetStatistics>, PointsTotals) {
        let entries = collect_per_pet(pets, |pet| self.statistics(&pet.id, period)).await;
        let totals = PointsTotals::from_statistics(&entries);
        (entries, totals)
    }
}

/// Runs one fetch per pet concurrently. Output order follows `pets`.
async fn collect_per_pet<'p, F, Fut>(pets: &'p [Pet], fetch: F) -> Vec<PetStatistics>
where
    F: Fn(&'p Pet) -> Fut,
    Fut: Future<Output = Option<Statistics>>,
{
    let results = join_all(pets.iter().map(fetch)).await;
    pets.iter()
        .cloned()
        .zip(results)
        .map(|(pet, statistics)| PetStatistics { pet, statistics })
        .collect()
}

fn animal_route(animal_id: &str, resource: &str) -> String {
    format!(
        "/api/v1/animals/{}/gamificacao/{resource}",
        path_segment(animal_id)
    )
}

fn or_empty<T>(result: ApiResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|error| {
        tracing::warn!("Failed to fetch {}: {}", what, error);
        Vec::new()
    })
}
