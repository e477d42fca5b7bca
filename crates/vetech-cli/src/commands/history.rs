use crate::commands::common::{format_health_lines, print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_history(pet_id: &str, json: bool, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let summary = context.client.health().history(pet_id).await?;
    if json {
        return print_json(&summary);
    }
    print_lines(&format_health_lines(&summary), "");
    if summary.recent_entries.is_empty() {
        println!("No history entries yet.");
    }
    Ok(())
}
