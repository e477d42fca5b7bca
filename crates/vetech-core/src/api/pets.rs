use reqwest::Method;
use serde_json::json;

use crate::auth::SessionPersistence;
use crate::http::{path_segment, ApiClient, ApiError, ApiResult};
use crate::models::{NewPet, Pet, PetUpdate};

const ANIMALS_ROUTE: &str = "/api/v1/animals";

pub struct PetsApi<'a, S: SessionPersistence> {
    pub(crate) client: &'a ApiClient<S>,
}

impl<S: SessionPersistence> PetsApi<'_, S> {
    pub async fn list(&self) -> ApiResult<Vec<Pet>> {
        let pets = self.client.get_list(ANIMALS_ROUTE, &[]).await?;
        tracing::debug!(count = pets.len(), "Fetched pets");
        Ok(pets)
    }

    pub async fn get(&self, id: &str) -> ApiResult<Pet> {
        self.client.get_json(&pet_route(id), &[]).await
    }

    pub async fn create(&self, pet: &NewPet) -> ApiResult<Pet> {
        if pet.name.trim().is_empty() || pet.species.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "pet name and species are required".to_string(),
            ));
        }
        let created: Pet = self
            .client
            .send_json(Method::POST, ANIMALS_ROUTE, pet)
            .await?;
        tracing::info!(animal_id = %created.id, "Pet created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &PetUpdate) -> ApiResult<Pet> {
        if update.is_empty() {
            return Err(ApiError::InvalidInput("nothing to update".to_string()));
        }
        self.client
            .send_json(Method::PUT, &pet_route(id), update)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&pet_route(id)).await?;
        tracing::info!(animal_id = id, "Pet deleted");
        Ok(())
    }

    /// Records a new weight in kilograms.
    pub async fn update_weight(&self, id: &str, weight_kg: f64) -> ApiResult<()> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "weight must be positive, got {weight_kg}"
            )));
        }
        self.client
            .send_empty(Method::PATCH, &pet_route(id), Some(&json!({ "weight": weight_kg })))
            .await
    }
}

fn pet_route(id: &str) -> String {
    format!("{ANIMALS_ROUTE}/{}", path_segment(id))
}
