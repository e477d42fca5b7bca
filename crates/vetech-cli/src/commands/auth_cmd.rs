use vetech_core::api::login_error_message;
use vetech_core::auth::claims::{decode_claims, TokenIdentity};
use vetech_core::SessionPersistence;

use crate::cli::AuthCommands;
use crate::commands::common::{print_json, CliContext};
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &CliContext) -> Result<(), CliError> {
    let profile_name = &context.profile_name;
    match command {
        AuthCommands::Login { email, password } => {
            let session = context
                .client
                .sessions()
                .login(&email, &password)
                .await
                .map_err(|error| {
                    tracing::debug!("Login failed: {}", error);
                    CliError::Auth(login_error_message(&error))
                })?;
            println!(
                "Signed in profile '{profile_name}' as {} <{}>",
                session.user.name, session.user.email
            );
            Ok(())
        }
        AuthCommands::Logout => {
            context
                .client
                .sessions()
                .logout()
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
        AuthCommands::Status { check } => {
            let Some(session) = context.client.session().restore() else {
                println!("Profile '{profile_name}' is not signed in.");
                return Ok(());
            };

            println!(
                "Profile '{profile_name}' is signed in as {} <{}>",
                session.user.name, session.user.email
            );
            if check {
                let base_url = context.client.base_url();
                if context.client.sessions().validate_token().await {
                    println!("Token accepted by {base_url}");
                } else {
                    println!("Token rejected by {base_url}; sign in again.");
                }
            }
            Ok(())
        }
        AuthCommands::Whoami { json } => {
            let token = context
                .client
                .session()
                .store()
                .load_token()
                .map_err(|error| CliError::Auth(error.to_string()))?
                .ok_or_else(|| CliError::NotSignedIn(profile_name.clone()))?;
            let claims = decode_claims(&token).map_err(vetech_core::Error::from)?;
            let expires_at = claims.exp;
            let identity = TokenIdentity::from_claims(claims);

            if json {
                return print_json(&identity);
            }
            for line in format_identity_lines(&identity, expires_at) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

pub fn format_identity_lines(identity: &TokenIdentity, expires_at: Option<i64>) -> Vec<String> {
    let mut lines = vec![
        format!("ID:     {}", identity.id),
        format!("Name:   {}", identity.name),
        format!("Email:  {}", identity.email),
        format!("Role:   {}", identity.role),
    ];
    if !identity.phone.is_empty() {
        lines.push(format!("Phone:  {}", identity.phone));
    }
    if let Some(clinic_id) = &identity.clinic_id {
        lines.push(format!("Clinic: {clinic_id}"));
    }
    if let Some(expires_at) =
        expires_at.and_then(|seconds| chrono::DateTime::from_timestamp(seconds, 0))
    {
        lines.push(format!("Expires: {}", expires_at.to_rfc3339()));
    }
    lines
}
