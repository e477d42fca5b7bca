use vetech_core::models::{ClientProfile, ProfileUpdate};
use vetech_core::util::normalize_text_option;

use crate::cli::ProfileCommands;
use crate::commands::common::{print_json, print_lines, CliContext};
use crate::error::CliError;

pub async fn run_profile(command: ProfileCommands, context: &CliContext) -> Result<(), CliError> {
    context.require_session()?;
    let profile = context.client.profile();

    match command {
        ProfileCommands::Show { json } => {
            let current = profile.get().await;
            if json {
                return print_json(&current);
            }
            print_lines(&format_profile_lines(&current), "");
        }
        ProfileCommands::Update { name, phone } => {
            let update = ProfileUpdate {
                name: normalize_text_option(name),
                phone: normalize_text_option(phone),
            };
            if update.is_empty() {
                return Err(CliError::InvalidInput(
                    "Nothing to update; pass --name and/or --phone".to_string(),
                ));
            }
            let updated = profile.update(&update).await?;
            println!("Profile updated");
            print_lines(&format_profile_lines(&updated), "");
        }
    }
    Ok(())
}

pub fn format_profile_lines(profile: &ClientProfile) -> Vec<String> {
    let phone = if profile.phone.is_empty() {
        "-"
    } else {
        profile.phone.as_str()
    };
    vec![
        format!("Name:  {}", profile.name),
        format!("Email: {}", profile.email),
        format!("Phone: {phone}"),
    ]
}
