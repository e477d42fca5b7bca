use chrono::Utc;
use reqwest::Method;

use crate::auth::SessionPersistence;
use crate::http::{path_segment, ApiClient, ApiResult};
use crate::models::{DailyProgress, Diet, DietProgress, DietRequest, GeneratedDietPlan};

const CLIENT_DIETS_ROUTE: &str = "/api/v1/client/diets";
const PROGRESS_ROUTE: &str = "/api/v1/client/diets/progress";
const TODAY_PROGRESS_ROUTE: &str = "/api/v1/client/diets/progress/today";

pub struct DietsApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> DietsApi<'_, S> {
    /// Every diet across the account's pets.
    pub async fn list(&self) -> ApiResult<Vec<Diet>> {
        self.client.get_list(CLIENT_DIETS_ROUTE, &[]).await
    }

    /// Builds a plan from the pet's attributes and stores it.
    ///
    /// A 500 yields a local placeholder diet instead of an error.
    pub async fn generate_with_ai(&self, request: &DietRequest) -> ApiResult<Diet> {
        let now = Utc::now();
        let plan = GeneratedDietPlan::from_request(request, now.date_naive());
        let route = format!("/api/v1/animals/{}/diets", path_segment(&request.animal_id));
        tracing::debug!(
            animal_id = %request.animal_id,
            calories = plan.calorias_totais_dia,
            "Submitting generated diet plan"
        );

        match self.client.send_json::<_, Diet>(Method::POST, &route, &plan).await {
            Ok(diet) => {
                tracing::info!(animal_id = %request.animal_id, "Diet created");
                Ok(diet)
            }
            Err(error) if error.status() == Some(500) => {
                tracing::warn!(
                    animal_id = %request.animal_id,
                    "Backend failed to store the diet, returning a local placeholder: {}",
                    error
                );
                Ok(Diet::placeholder(request, now))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn add_progress(&self, progress: &DietProgress) -> ApiResult<()> {
        self.client
            .send_empty(Method::POST, PROGRESS_ROUTE, Some(progress))
            .await
    }

    pub async fn today_progress(&self) -> ApiResult<DailyProgress> {
        self.client.get_json(TODAY_PROGRESS_ROUTE, &[]).await
    }
}
