use vetech_core::models::{DailyProgress, DietProgress, DietRequest, Pet};
use vetech_core::util::normalize_text_option;

use crate::cli::{ActivityArg, DietCommands, FeedingArg, ObjectiveArg};
use crate::commands::common::{format_diet_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_diets(command: DietCommands, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let diets = context.client.diets();

    match command {
        DietCommands::List { pet, json } => {
            let mut list = diets.list().await?;
            if let Some(pet_id) = pet.as_deref() {
                list.retain(|diet| diet.animal_id.as_deref() == Some(pet_id));
            }
            if json {
                return print_json(&list);
            }
            print_lines(&format_diet_lines(&list), "No diet plans.");
        }
        DietCommands::Generate {
            pet,
            activity,
            objective,
            feeding,
            weight,
            notes,
        } => {
            let pet = context.client.pets().get(&pet).await?;
            let request = build_diet_request(&pet, activity, objective, feeding, weight, notes)?;
            let diet = diets.generate_with_ai(&request).await?;
            print_lines(&format_diet_lines(std::slice::from_ref(&diet)), "");
        }
        DietCommands::Progress {
            meal,
            grams,
            at,
            notes,
        } => {
            if !grams.is_finite() || grams <= 0.0 {
                return Err(CliError::InvalidInput(
                    "Grams served must be greater than zero".to_string(),
                ));
            }
            let served_at = normalize_text_option(at)
                .unwrap_or_else(|| chrono::Local::now().format("%H:%M").to_string());
            diets
                .add_progress(&DietProgress {
                    meal_index: meal,
                    served_at: served_at.clone(),
                    grams,
                    tutor_notes: normalize_text_option(notes),
                })
                .await?;
            println!("Logged meal {meal} at {served_at} ({grams} g)");
        }
        DietCommands::Today { json } => {
            let progress = diets.today_progress().await?;
            if json {
                return print_json(&progress);
            }
            print_lines(&format_daily_progress_lines(&progress), "");
        }
    }
    Ok(())
}

/// Uses the pet's recorded weight unless one is given explicitly.
pub fn build_diet_request(
    pet: &Pet,
    activity: ActivityArg,
    objective: ObjectiveArg,
    feeding: FeedingArg,
    weight: Option<f64>,
    notes: Option<String>,
) -> Result<DietRequest, CliError> {
    let weight_kg = weight
        .or(pet.weight)
        .filter(|kg| kg.is_finite() && *kg > 0.0)
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "{} has no recorded weight; pass --weight <KG>",
                pet.name
            ))
        })?;

    Ok(DietRequest {
        animal_id: pet.id.clone(),
        pet_name: pet.name.clone(),
        weight_kg,
        age_years: pet.age.unwrap_or(1),
        activity: activity.into(),
        objective: objective.into(),
        feeding_type: feeding.into(),
        notes: normalize_text_option(notes),
    })
}

pub fn format_daily_progress_lines(progress: &DailyProgress) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}: {}/{} refeições, {}/{} cal ({:.0}%)",
            progress.date,
            progress.meals_served,
            progress.total_meals,
            progress.calories_consumed,
            progress.total_calories,
            progress.percent_complete
        ),
    ];
    lines.extend(progress.meals.iter().map(|meal| {
        format!(
            "  #{} {}  {} g",
            meal.meal_index, meal.served_at, meal.grams
        )
    }));
    lines
}
