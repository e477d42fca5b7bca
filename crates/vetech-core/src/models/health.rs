//! Pet health history, aggregated client-side from consultations and diets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Consultation, Diet, DietStatus, Pet};
use crate::util::parse_api_timestamp;

const RECENT_ENTRY_LIMIT: usize = 10;
const CONSULTATION_TITLE: &str = "Consulta Veterinária";
const CONSULTATION_FALLBACK_DESCRIPTION: &str = "Consulta realizada";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthEntryKind {
    Consulta,
    Peso,
    Dieta,
    Observacao,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub id: String,
    pub animal_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: HealthEntryKind,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl HealthEntry {
    fn from_consultation(animal_id: &str, consultation: &Consultation) -> Self {
        Self {
            id: format!("consultation-{}", consultation.id),
            animal_id: animal_id.to_string(),
            date: consultation.date.clone(),
            kind: HealthEntryKind::Consulta,
            title: CONSULTATION_TITLE.to_string(),
            description: consultation
                .description
                .clone()
                .filter(|description| !description.trim().is_empty())
                .unwrap_or_else(|| CONSULTATION_FALLBACK_DESCRIPTION.to_string()),
            created_at: consultation.date.clone(),
        }
    }

    fn from_diet(animal_id: &str, diet: &Diet) -> Self {
        let date = diet
            .created_at
            .clone()
            .unwrap_or_else(|| diet.start_date.clone());
        Self {
            id: format!("diet-{}", diet.id.as_deref().unwrap_or_default()),
            animal_id: animal_id.to_string(),
            date: date.clone(),
            kind: HealthEntryKind::Dieta,
            title: diet.name.clone(),
            description: format!(
                "Dieta {} - {} cal/dia",
                diet.objective.as_str(),
                diet.daily_calories
            ),
            created_at: date,
        }
    }

    /// A manual note. There is no backend endpoint for these, so the entry
    /// only lives on the client.
    pub fn observation(
        animal_id: &str,
        title: &str,
        description: &str,
        date: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let created_at = now.to_rfc3339();
        Self {
            id: format!("obs-{}", now.timestamp_millis()),
            animal_id: animal_id.to_string(),
            date: date.unwrap_or_else(|| created_at.clone()),
            kind: HealthEntryKind::Observacao,
            title: title.to_string(),
            description: description.to_string(),
            created_at,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_api_timestamp(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSummary {
    pub pet: Pet,
    pub current_weight: f64,
    pub last_consultation: Option<Consultation>,
    pub active_diets: Vec<Diet>,
    pub recent_entries: Vec<HealthEntry>,
}

/// Merges consultations and the pet's diets into a newest-first history.
///
/// `diets` may include other pets' diets; only those for `pet` are kept.
/// Entries with unreadable dates sort last.
pub fn build_health_summary(
    pet: Pet,
    consultations: &[Consultation],
    diets: Vec<Diet>,
) -> HealthSummary {
    let pet_diets = diets
        .into_iter()
        .filter(|diet| diet.animal_id.as_deref() == Some(pet.id.as_str()))
        .collect::<Vec<_>>();

    let mut entries = consultations
        .iter()
        .map(|consultation| HealthEntry::from_consultation(&pet.id, consultation))
        .chain(
            pet_diets
                .iter()
                .map(|diet| HealthEntry::from_diet(&pet.id, diet)),
        )
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.timestamp()));
    entries.truncate(RECENT_ENTRY_LIMIT);

    let last_consultation = consultations
        .iter()
        .max_by_key(|consultation| consultation.scheduled_at())
        .cloned();

    HealthSummary {
        current_weight: pet.weight.unwrap_or_default(),
        last_consultation,
        active_diets: pet_diets
            .into_iter()
            .filter(|diet| diet.status == DietStatus::Active)
            .collect(),
        recent_entries: entries,
        pet,
    }
}
