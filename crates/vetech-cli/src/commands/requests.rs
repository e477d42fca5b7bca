use vetech_core::models::NewAppointmentRequest;
use vetech_core::util::normalize_text_option;

use crate::cli::RequestCommands;
use crate::commands::common::{format_request_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_requests(command: RequestCommands, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let requests = context.client.appointment_requests();

    match command {
        RequestCommands::List { json } => {
            let list = requests.list().await?;
            if json {
                return print_json(&list);
            }
            print_lines(&format_request_lines(&list), "No appointment requests.");
        }
        RequestCommands::Create {
            pet,
            service,
            date,
            start,
            end,
            notes,
            priority,
        } => {
            let start_time = normalize_clock_time(&start)?;
            let end_time = normalize_clock_time(&end)?;
            if end_time <= start_time {
                return Err(CliError::InvalidInput(
                    "End time must be after start time".to_string(),
                ));
            }
            let created = requests
                .create(&NewAppointmentRequest {
                    animal_id: pet,
                    service_type: service,
                    date,
                    start_time,
                    end_time,
                    notes: normalize_text_option(notes),
                    priority: priority.into(),
                })
                .await?;
            println!(
                "Request {} sent for {} {}-{}",
                created.id.as_deref().unwrap_or("-"),
                created.date,
                created.start_time,
                created.end_time
            );
        }
        RequestCommands::Cancel { id } => {
            requests.cancel(&id).await?;
            println!("Withdrew request {id}");
        }
    }
    Ok(())
}

/// Accepts `HH:MM` or `HH:MM:SS` and returns `HH:MM:SS`.
pub fn normalize_clock_time(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim();
    let parsed = chrono::NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| CliError::InvalidInput(format!("Invalid time '{raw}', expected HH:MM")))?;
    Ok(parsed.format("%H:%M:%S").to_string())
}
