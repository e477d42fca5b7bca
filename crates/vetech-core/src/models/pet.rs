//! Pet model

use serde::{Deserialize, Serialize};

use crate::util::string_or_number;

/// A pet owned by the signed-in account.
///
/// Older backend builds answered with Portuguese field names, and some send
/// both spellings at once. The English key wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PetRecord")]
pub struct Pet {
    pub id: String,
    pub name: String,
    /// Free text, e.g. "Cachorro" or "Gato"
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Wire shape of a pet with both field spellings kept apart.
#[derive(Deserialize)]
struct PetRecord {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    species: Option<String>,
    #[serde(default)]
    especie: Option<String>,
    #[serde(default)]
    breed: Option<String>,
    #[serde(default)]
    raca: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    idade: Option<u32>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    peso: Option<f64>,
    #[serde(default)]
    medical_history: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl TryFrom<PetRecord> for Pet {
    type Error = String;

    fn try_from(record: PetRecord) -> Result<Self, Self::Error> {
        let name = record
            .name
            .or(record.nome)
            .ok_or_else(|| format!("pet {} has no name", record.id))?;
        let species = record
            .species
            .or(record.especie)
            .ok_or_else(|| format!("pet {} has no species", record.id))?;
        Ok(Self {
            id: record.id,
            name,
            species,
            breed: record.breed.or(record.raca),
            age: record.age.or(record.idade),
            weight: record.weight.or(record.peso),
            medical_history: record.medical_history,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Body of `POST /api/v1/animals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

/// Body of `PUT /api/v1/animals/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl PetUpdate {
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.medical_history.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pet_accepts_portuguese_field_names() {
        let pet: Pet = serde_json::from_value(json!({
            "id": "p1",
            "nome": "Rex",
            "especie": "Cachorro",
            "raca": "Labrador",
            "idade": 5,
            "peso": 25.5
        }))
        .unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.breed.as_deref(), Some("Labrador"));
        assert_eq!(pet.weight, Some(25.5));
    }

    #[test]
    fn pet_prefers_english_keys_when_both_spellings_arrive() {
        let pet: Pet = serde_json::from_value(json!({
            "id": 7,
            "name": "Rex",
            "nome": "Rex antigo",
            "species": "Cachorro",
            "especie": "Cão",
            "peso": 25.5
        }))
        .unwrap();
        assert_eq!(pet.id, "7");
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.species, "Cachorro");
        assert_eq!(pet.weight, Some(25.5));
    }

    #[test]
    fn pet_without_name_is_rejected() {
        let result = serde_json::from_value::<Pet>(json!({ "id": "p1", "species": "Gato" }));
        assert!(result.unwrap_err().to_string().contains("no name"));
    }

    #[test]
    fn pet_round_trips_through_english_keys() {
        let pet: Pet = serde_json::from_value(json!({
            "id": "p1", "nome": "Mia", "especie": "Gato", "idade": 2
        }))
        .unwrap();
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(
            value,
            json!({ "id": "p1", "name": "Mia", "species": "Gato", "age": 2 })
        );
        assert_eq!(serde_json::from_value::<Pet>(value).unwrap(), pet);
    }

    #[test]
    fn pet_update_omits_unset_fields() {
        let update = PetUpdate {
            weight: Some(12.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "weight": 12.0 }));
        assert!(PetUpdate::default().is_empty());
    }
}
