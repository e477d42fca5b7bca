use chrono::Utc;

use crate::auth::SessionPersistence;
use crate::http::{ApiClient, ApiResult};
use crate::models::{build_health_summary, Consultation, HealthEntry, HealthSummary, Pet};

const CONSULTATIONS_ROUTE: &str = "/api/v1/consultations";

pub struct HealthApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> HealthApi<'_, S> {
    /// Health history for one pet, built from its consultations and diets.
    pub async fn history(&self, animal_id: &str) -> ApiResult<HealthSummary> {
        let pet: Pet = self.client.pets().get(animal_id).await?;
        let consultations: Vec<Consultation> = self
            .client
            .get_list(CONSULTATIONS_ROUTE, &[("animal_id", animal_id.to_string())])
            .await?;
        let diets = self.client.diets().list().await?;

        let summary = build_health_summary(pet, &consultations, diets);
        tracing::debug!(
            animal_id,
            entries = summary.recent_entries.len(),
            "Built health history"
        );
        Ok(summary)
    }

    /// A manual note for the pet's history, kept on the client only.
    pub fn observation(
        &self,
        animal_id: &str,
        title: &str,
        description: &str,
        date: Option<String>,
    ) -> HealthEntry {
        HealthEntry::observation(animal_id, title, description, date, Utc::now())
    }
}
