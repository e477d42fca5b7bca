//! Diet plan model

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const BASE_CALORIES_PER_KG: f64 = 30.0;
const MEALS_PER_DAY: u32 = 3;
const ESTIMATED_MONTHLY_COST: f64 = 180.0;
const DEFAULT_FOOD_ID: u32 = 1;
const FIRST_MEAL_TIME: &str = "08:00";
const PLAN_LENGTH_MONTHS: u32 = 3;
const PLACEHOLDER_LENGTH_DAYS: u64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedingType {
    #[serde(rename = "ração")]
    Kibble,
    #[serde(rename = "caseira")]
    Homemade,
    #[serde(rename = "mista")]
    Mixed,
}

impl FeedingType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kibble => "ração",
            Self::Homemade => "caseira",
            Self::Mixed => "mista",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietObjective {
    #[serde(rename = "emagrecimento")]
    WeightLoss,
    #[serde(rename = "ganho_peso")]
    WeightGain,
    #[serde(rename = "manutenção")]
    Maintenance,
    #[serde(rename = "especial")]
    Special,
}

impl DietObjective {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "emagrecimento",
            Self::WeightGain => "ganho_peso",
            Self::Maintenance => "manutenção",
            Self::Special => "especial",
        }
    }

    const fn calorie_multiplier(self) -> f64 {
        match self {
            Self::WeightLoss => 0.8,
            Self::WeightGain => 1.2,
            Self::Maintenance | Self::Special => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietStatus {
    #[serde(rename = "ativa")]
    Active,
    #[serde(rename = "pausada")]
    Paused,
    #[serde(rename = "finalizada")]
    Finished,
    #[serde(other)]
    Unknown,
}

impl DietStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ativa",
            Self::Paused => "pausada",
            Self::Finished => "finalizada",
            Self::Unknown => "desconhecida",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "moderada")]
    Moderate,
    #[serde(rename = "alta")]
    High,
}

impl ActivityLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "baixa",
            Self::Moderate => "moderada",
            Self::High => "alta",
        }
    }

    const fn calorie_multiplier(self) -> f64 {
        match self {
            Self::Low => 1.2,
            Self::Moderate => 1.5,
            Self::High => 1.8,
        }
    }
}

/// Daily calorie target for a pet.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn daily_calories(weight_kg: f64, activity: ActivityLevel, objective: DietObjective) -> u32 {
    let calories = weight_kg
        * BASE_CALORIES_PER_KG
        * activity.calorie_multiplier()
        * objective.calorie_multiplier();
    calories.round().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub feeding_type: FeedingType,
    #[serde(rename = "objetivo")]
    pub objective: DietObjective,
    #[serde(rename = "data_inicio")]
    pub start_date: String,
    #[serde(rename = "data_fim")]
    pub end_date: String,
    pub status: DietStatus,
    #[serde(rename = "refeicoes_por_dia")]
    pub meals_per_day: u32,
    #[serde(rename = "calorias_totais_dia")]
    pub daily_calories: f64,
    #[serde(rename = "valor_mensal_estimado", default)]
    pub estimated_monthly_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_id: Option<String>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Diet {
    /// Locally fabricated result for a generation request the backend failed
    /// to store.
    pub fn placeholder(request: &DietRequest, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let end = today
            .checked_add_days(Days::new(PLACEHOLDER_LENGTH_DAYS))
            .unwrap_or(today);
        let timestamp = now.to_rfc3339();

        Self {
            id: Some(format!("diet_{}", now.timestamp_millis())),
            name: request.plan_name(),
            feeding_type: request.feeding_type,
            objective: request.objective,
            start_date: format_date(today),
            end_date: format_date(end),
            status: DietStatus::Active,
            meals_per_day: MEALS_PER_DAY,
            daily_calories: request.weight_kg * BASE_CALORIES_PER_KG * 1.5,
            estimated_monthly_cost: ESTIMATED_MONTHLY_COST,
            animal_id: Some(request.animal_id.clone()),
            notes: request.notes.clone(),
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        }
    }
}

/// Pet attributes sent to the AI diet generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietRequest {
    pub animal_id: String,
    pub pet_name: String,
    pub weight_kg: f64,
    pub age_years: u32,
    pub activity: ActivityLevel,
    pub objective: DietObjective,
    pub feeding_type: FeedingType,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DietRequest {
    fn plan_name(&self) -> String {
        format!("Dieta {} para {}", self.objective.as_str(), self.pet_name)
    }
}

/// Body of `POST /api/v1/animals/{id}/diets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDietPlan {
    pub nome: String,
    pub tipo: FeedingType,
    pub objetivo: DietObjective,
    pub data_inicio: String,
    pub data_fim: String,
    pub status: DietStatus,
    pub refeicoes_por_dia: u32,
    pub calorias_totais_dia: u32,
    pub valor_mensal_estimado: f64,
    pub alimento_id: u32,
    pub quantidade_gramas: u32,
    pub horario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

impl GeneratedDietPlan {
    pub fn from_request(request: &DietRequest, today: NaiveDate) -> Self {
        let calories = daily_calories(request.weight_kg, request.activity, request.objective);
        let end = today
            .checked_add_months(Months::new(PLAN_LENGTH_MONTHS))
            .unwrap_or(today);

        Self {
            nome: request.plan_name(),
            tipo: request.feeding_type,
            objetivo: request.objective,
            data_inicio: format_date(today),
            data_fim: format_date(end),
            status: DietStatus::Active,
            refeicoes_por_dia: MEALS_PER_DAY,
            calorias_totais_dia: calories,
            valor_mensal_estimado: ESTIMATED_MONTHLY_COST,
            alimento_id: DEFAULT_FOOD_ID,
            quantidade_gramas: (calories + 2) / 4,
            horario: FIRST_MEAL_TIME.to_string(),
            observacoes: request.notes.clone(),
        }
    }
}

/// One meal logged by the tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietProgress {
    #[serde(rename = "refeicao_index")]
    pub meal_index: u32,
    #[serde(rename = "horario_realizado")]
    pub served_at: String,
    #[serde(rename = "quantidade_gramas")]
    pub grams: f64,
    #[serde(rename = "observacoes_tutor", default, skip_serializing_if = "Option::is_none")]
    pub tutor_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: String,
    #[serde(rename = "total_refeicoes")]
    pub total_meals: u32,
    #[serde(rename = "refeicoes_realizadas")]
    pub meals_served: u32,
    #[serde(rename = "total_calorias")]
    pub total_calories: f64,
    #[serde(rename = "calorias_consumidas")]
    pub calories_consumed: f64,
    #[serde(rename = "progresso_percentual")]
    pub percent_complete: f64,
    #[serde(rename = "refeicoes", default)]
    pub meals: Vec<DietProgress>,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn request() -> DietRequest {
        DietRequest {
            animal_id: "pet-1".to_string(),
            pet_name: "Rex".to_string(),
            weight_kg: 10.0,
            age_years: 4,
            activity: ActivityLevel::Moderate,
            objective: DietObjective::Maintenance,
            feeding_type: FeedingType::Kibble,
            notes: None,
        }
    }

    #[test]
    fn daily_calories_apply_both_multipliers() {
        assert_eq!(
            daily_calories(10.0, ActivityLevel::Moderate, DietObjective::Maintenance),
            450
        );
        assert_eq!(
            daily_calories(10.0, ActivityLevel::Low, DietObjective::WeightLoss),
            288
        );
        assert_eq!(
            daily_calories(7.3, ActivityLevel::High, DietObjective::WeightGain),
            473
        );
    }

    #[test]
    fn generated_plan_spans_three_months() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let plan = GeneratedDietPlan::from_request(&request(), today);
        let body = serde_json::to_value(&plan).unwrap();

        assert_eq!(body["nome"], "Dieta manutenção para Rex");
        assert_eq!(body["tipo"], "ração");
        assert_eq!(body["data_inicio"], "2025-01-15");
        assert_eq!(body["data_fim"], "2025-04-15");
        assert_eq!(body["status"], "ativa");
        assert_eq!(body["calorias_totais_dia"], 450);
        assert_eq!(body["quantidade_gramas"], 113);
        assert_eq!(body["horario"], "08:00");
        assert!(body.get("observacoes").is_none());
    }

    #[test]
    fn placeholder_uses_flat_activity_estimate() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let diet = Diet::placeholder(&request(), now);
        assert_eq!(diet.id.as_deref(), Some("diet_1740819600000"));
        assert_eq!(diet.start_date, "2025-03-01");
        assert_eq!(diet.end_date, "2025-05-30");
        assert!((diet.daily_calories - 450.0).abs() < f64::EPSILON);
        assert_eq!(diet.animal_id.as_deref(), Some("pet-1"));
    }

    #[test]
    fn diet_parses_backend_payload() {
        let diet: Diet = serde_json::from_value(json!({
            "id": "d1",
            "nome": "Dieta emagrecimento para Mia",
            "tipo": "caseira",
            "objetivo": "emagrecimento",
            "data_inicio": "2025-01-01",
            "data_fim": "2025-04-01",
            "status": "pausada",
            "refeicoes_por_dia": 2,
            "calorias_totais_dia": 210.5,
            "valor_mensal_estimado": 90,
            "animal_id": "mia"
        }))
        .unwrap();
        assert_eq!(diet.feeding_type, FeedingType::Homemade);
        assert_eq!(diet.status, DietStatus::Paused);
        assert_eq!(diet.meals_per_day, 2);
    }

    #[test]
    fn unknown_diet_status_is_tolerated() {
        let status: DietStatus = serde_json::from_value(json!("arquivada")).unwrap();
        assert_eq!(status, DietStatus::Unknown);
    }
}
