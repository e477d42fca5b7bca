use vetech_core::models::{NewPet, PetUpdate};
use vetech_core::util::normalize_text_option;

use crate::cli::PetCommands;
use crate::commands::common::{format_pet_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_pets(command: PetCommands, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let pets = context.client.pets();

    match command {
        PetCommands::List { json } => {
            let list = pets.list().await?;
            if json {
                return print_json(&list);
            }
            print_lines(&format_pet_lines(&list), "No pets registered.");
        }
        PetCommands::Show { id, json } => {
            let pet = pets.get(&id).await?;
            if json {
                return print_json(&pet);
            }
            print_lines(&format_pet_lines(std::slice::from_ref(&pet)), "");
            if let Some(history) = pet.medical_history.as_deref().filter(|text| !text.is_empty()) {
                println!("Histórico: {history}");
            }
        }
        PetCommands::Add {
            name,
            species,
            breed,
            age,
            weight,
            medical_history,
        } => {
            let pet = pets
                .create(&NewPet {
                    name,
                    species,
                    breed: normalize_text_option(breed),
                    age,
                    weight,
                    medical_history: normalize_text_option(medical_history),
                })
                .await?;
            println!("Registered {} ({})", pet.name, pet.id);
        }
        PetCommands::Update {
            id,
            name,
            species,
            breed,
            age,
            weight,
            medical_history,
        } => {
            let update = PetUpdate {
                name: normalize_text_option(name),
                species: normalize_text_option(species),
                breed: normalize_text_option(breed),
                age,
                weight,
                medical_history: normalize_text_option(medical_history),
            };
            if update.is_empty() {
                return Err(CliError::InvalidInput(
                    "Nothing to update; pass at least one field".to_string(),
                ));
            }
            let pet = pets.update(&id, &update).await?;
            println!("Updated {} ({})", pet.name, pet.id);
        }
        PetCommands::Remove { id } => {
            pets.delete(&id).await?;
            println!("Removed pet {id}");
        }
        PetCommands::Weight { id, kg } => {
            pets.update_weight(&id, kg).await?;
            println!("Recorded {kg} kg for pet {id}");
        }
    }
    Ok(())
}
