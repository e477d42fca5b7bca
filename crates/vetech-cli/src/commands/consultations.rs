use vetech_core::models::NewConsultation;
use vetech_core::util::normalize_text_option;

use crate::cli::ConsultationCommands;
use crate::commands::common::{
    format_consultation_lines, format_overview_lines, print_json, print_lines, CliContext,
};
use crate::error::CliError;

pub async fn run_consultations(
    command: ConsultationCommands,
    context: &CliContext,
) -> Result<(), CliError> {
    context.require_session()?;
    let consultations = context.client.consultations();

    match command {
        ConsultationCommands::List { json } => {
            let list = consultations.list().await?;
            if json {
                return print_json(&list);
            }
            print_lines(&format_consultation_lines(&list), "No consultations booked.");
            if !list.is_empty() {
                let overview = consultations.overview().await?;
                println!();
                print_lines(&format_overview_lines(&overview), "");
            }
        }
        ConsultationCommands::Book {
            pet,
            date,
            time,
            service,
            description,
            notes,
        } => {
            let consultation = consultations
                .create(&NewConsultation {
                    animal_id: pet,
                    date,
                    start_time: time,
                    service_type: service,
                    description: normalize_text_option(description),
                    notes: normalize_text_option(notes),
                })
                .await?;
            println!(
                "Booked {} on {} at {}",
                consultation.id,
                consultation.date,
                consultation.start_slot().unwrap_or("--:--")
            );
        }
        ConsultationCommands::Cancel { id } => {
            consultations.cancel(&id).await?;
            println!("Cancelled consultation {id}");
        }
        ConsultationCommands::Slots { date, json } => {
            let slots = consultations.available_time_slots(&date).await;
            if json {
                return print_json(&slots);
            }
            if slots.is_empty() {
                println!("No free slots on {date}.");
            } else {
                println!("{}", slots.join("  "));
            }
        }
    }
    Ok(())
}
