//! Gamification (goals, points and rewards) models

use serde::{Deserialize, Serialize};

use super::Pet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Atividade,
    Alimentacao,
    Peso,
    Consulta,
}

impl GoalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atividade => "atividade",
            Self::Alimentacao => "alimentacao",
            Self::Peso => "peso",
            Self::Consulta => "consulta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Diario,
    Semanal,
    Mensal,
}

impl GoalPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diario => "diario",
            Self::Semanal => "semanal",
            Self::Mensal => "mensal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Ativa,
    Inativa,
}

impl GoalStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ativa => "ativa",
            Self::Inativa => "inativa",
        }
    }
}

/// A clinic-defined goal (`meta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub clinic_id: Option<String>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: GoalKind,
    #[serde(rename = "quantidade")]
    pub quantity: f64,
    #[serde(rename = "unidade", default)]
    pub unit: String,
    #[serde(rename = "periodo")]
    pub period: GoalPeriod,
    #[serde(rename = "pontos_recompensa")]
    pub reward_points: i64,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalFilter {
    pub kind: Option<GoalKind>,
    pub status: Option<GoalStatus>,
    pub period: Option<GoalPeriod>,
}

impl GoalFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.kind {
            query.push(("tipo", kind.as_str().to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(period) = self.period {
            query.push(("periodo", period.as_str().to_string()));
        }
        query
    }
}

/// Points earned by a pet (`pontuação`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEntry {
    pub id: String,
    pub animal_id: String,
    #[serde(rename = "meta_id", default)]
    pub goal_id: Option<String>,
    #[serde(rename = "meta_descricao", default, skip_serializing_if = "Option::is_none")]
    pub goal_description: Option<String>,
    #[serde(rename = "pontos_obtidos")]
    pub points: i64,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub goal_id: Option<String>,
}

impl PointsFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("data_inicio", &self.start_date),
            ("data_fim", &self.end_date),
            ("meta_id", &self.goal_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (name, value.to_string()))
        })
        .collect()
    }
}

/// A reward in the clinic catalogue (`recompensa`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "pontos_necessarios")]
    pub points_required: i64,
    /// Free text on the backend.
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardFilter {
    pub kind: Option<String>,
    pub min_points: Option<i64>,
    pub max_points: Option<i64>,
}

impl RewardFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.kind.as_deref().filter(|kind| !kind.is_empty()) {
            query.push(("tipo", kind.to_string()));
        }
        if let Some(min) = self.min_points.filter(|points| *points > 0) {
            query.push(("pontos_min", min.to_string()));
        }
        if let Some(max) = self.max_points.filter(|points| *points > 0) {
            query.push(("pontos_max", max.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Ativo,
    Usado,
    Expirado,
}

impl RedemptionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ativo => "ativo",
            Self::Usado => "usado",
            Self::Expirado => "expirado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemedReward {
    pub id: String,
    pub animal_id: String,
    #[serde(rename = "recompensa_id")]
    pub reward_id: String,
    #[serde(rename = "recompensa_nome", default, skip_serializing_if = "Option::is_none")]
    pub reward_name: Option<String>,
    #[serde(rename = "pontos_gastos")]
    pub points_spent: i64,
    #[serde(rename = "codigo_verificacao")]
    pub verification_code: String,
    #[serde(rename = "data_resgate")]
    pub redeemed_at: String,
    #[serde(rename = "data_expiracao", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub status: RedemptionStatus,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalProgressStatus {
    EmAndamento,
    Concluida,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    #[serde(rename = "meta_id")]
    pub goal_id: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "progresso_atual")]
    pub current: f64,
    #[serde(rename = "meta_total")]
    pub target: f64,
    #[serde(rename = "percentual")]
    pub percent: f64,
    pub status: GoalProgressStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsHistoryEntry {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "pontos")]
    pub points: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "pontos_totais", default)]
    pub total_points: i64,
    #[serde(rename = "pontos_periodo", default)]
    pub period_points: i64,
    #[serde(rename = "pontos_disponiveis", default)]
    pub available_points: i64,
    #[serde(rename = "recompensas_resgatadas", default)]
    pub rewards_redeemed: u32,
    #[serde(rename = "metas_concluidas", default)]
    pub goals_completed: u32,
    #[serde(rename = "metas_em_andamento", default)]
    pub goals_in_progress: u32,
    #[serde(rename = "progresso_metas", default)]
    pub goal_progress: Vec<GoalProgress>,
    #[serde(rename = "historico_pontos", default)]
    pub points_history: Vec<PointsHistoryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsPeriod {
    Weekly,
    Monthly,
    Quarterly,
}

impl StatisticsPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "semanal",
            Self::Monthly => "mensal",
            Self::Quarterly => "trimestral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl RankingPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "semanal",
            Self::Monthly => "mensal",
            Self::Yearly => "anual",
        }
    }
}

/// Statistics fetched for one pet; `None` when the fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetStatistics {
    pub pet: Pet,
    pub statistics: Option<Statistics>,
}

/// Points summed across pets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsTotals {
    pub total: i64,
    pub available: i64,
    pub period: i64,
}

impl PointsTotals {
    pub fn from_statistics(entries: &[PetStatistics]) -> Self {
        entries
            .iter()
            .filter_map(|entry| entry.statistics.as_ref())
            .fold(Self::default(), |totals, statistics| Self {
                total: totals.total + statistics.total_points,
                available: totals.available + statistics.available_points,
                period: totals.period + statistics.period_points,
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn pet(id: &str) -> Pet {
        serde_json::from_value(json!({ "id": id, "name": id, "species": "cão" })).unwrap()
    }

    fn statistics(total: i64, available: i64, period: i64) -> Statistics {
        Statistics {
            total_points: total,
            available_points: available,
            period_points: period,
            ..Statistics::default()
        }
    }

    #[test]
    fn goal_filter_only_sends_present_fields() {
        let filter = GoalFilter {
            kind: Some(GoalKind::Alimentacao),
            period: Some(GoalPeriod::Semanal),
            ..GoalFilter::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("tipo", "alimentacao".to_string()),
                ("periodo", "semanal".to_string())
            ]
        );
        assert!(GoalFilter::default().to_query().is_empty());
    }

    #[test]
    fn points_filter_skips_empty_values() {
        let filter = PointsFilter {
            start_date: Some("2025-01-01".to_string()),
            end_date: Some(String::new()),
            goal_id: Some("m1".to_string()),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("data_inicio", "2025-01-01".to_string()),
                ("meta_id", "m1".to_string())
            ]
        );
    }

    #[test]
    fn reward_filter_ignores_zero_bounds() {
        let filter = RewardFilter {
            kind: Some("banho".to_string()),
            min_points: Some(0),
            max_points: Some(500),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("tipo", "banho".to_string()),
                ("pontos_max", "500".to_string())
            ]
        );
    }

    #[test]
    fn totals_treat_missing_statistics_as_zero() {
        let entries = vec![
            PetStatistics {
                pet: pet("a"),
                statistics: Some(statistics(100, 40, 10)),
            },
            PetStatistics {
                pet: pet("b"),
                statistics: None,
            },
            PetStatistics {
                pet: pet("c"),
                statistics: Some(statistics(25, 25, 5)),
            },
        ];
        assert_eq!(
            PointsTotals::from_statistics(&entries),
            PointsTotals {
                total: 125,
                available: 65,
                period: 15
            }
        );
    }

    #[test]
    fn statistics_parse_partial_payload() {
        let parsed: Statistics = serde_json::from_value(json!({
            "pontos_totais": 320,
            "pontos_disponiveis": 120,
            "progresso_metas": [{
                "meta_id": "m1",
                "descricao": "Passeios",
                "progresso_atual": 3,
                "meta_total": 5,
                "percentual": 60.0,
                "status": "em_andamento"
            }],
            "historico_pontos": [{ "data": "2025-05-01", "pontos": 20 }]
        }))
        .unwrap();
        assert_eq!(parsed.total_points, 320);
        assert_eq!(parsed.period_points, 0);
        assert_eq!(
            parsed.goal_progress[0].status,
            GoalProgressStatus::EmAndamento
        );
        assert_eq!(parsed.points_history[0].points, 20);
    }

    #[test]
    fn redeemed_reward_reads_portuguese_fields() {
        let redeemed: RedeemedReward = serde_json::from_value(json!({
            "id": "r1",
            "animal_id": "a1",
            "recompensa_id": "rw1",
            "pontos_gastos": 200,
            "codigo_verificacao": "ABC123",
            "data_resgate": "2025-05-01T10:00:00",
            "status": "usado"
        }))
        .unwrap();
        assert_eq!(redeemed.status, RedemptionStatus::Usado);
        assert_eq!(redeemed.verification_code, "ABC123");
        assert_eq!(redeemed.expires_at, None);
    }
}
