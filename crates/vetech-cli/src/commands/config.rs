use serde::Serialize;
use vetech_core::config::normalize_base_url;

use crate::cli::ConfigCommands;
use crate::commands::common::print_json;
use crate::config_profiles::{default_config_path, CliProfilesConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ResolvedSettings {
    profile: String,
    active: bool,
    config_path: String,
    api_base_url: String,
    request_timeout_secs: u64,
}

pub fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
    api_url: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            timeout_secs,
            no_activate,
        } => {
            let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = apply_config_init(
                &mut config,
                profile.as_deref().or(global_profile),
                api_base_url.as_deref(),
                timeout_secs,
                no_activate,
            )?;
            let path = config.save().map_err(CliError::Config)?;
            println!(
                "Profile '{}' initialized at {}",
                profile_name,
                path.display()
            );
            println!(
                "Run `vetech --profile {profile_name} auth login --email <EMAIL> --password <PASSWORD>` to sign in."
            );
            Ok(())
        }
        ConfigCommands::Show { json } => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let path = default_config_path().map_err(CliError::Config)?;
            let settings =
                resolve_settings(&config, global_profile, api_url, &path.display().to_string())?;
            if json {
                return print_json(&settings);
            }
            println!(
                "Profile:  {}{}",
                settings.profile,
                if settings.active { " (active)" } else { "" }
            );
            println!("Config:   {}", settings.config_path);
            println!("API:      {}", settings.api_base_url);
            println!("Timeout:  {}s", settings.request_timeout_secs);
            Ok(())
        }
    }
}

/// Writes the given settings into the named profile and returns its name.
pub fn apply_config_init(
    config: &mut CliProfilesConfig,
    profile_name: Option<&str>,
    api_base_url: Option<&str>,
    timeout_secs: Option<u64>,
    no_activate: bool,
) -> Result<String, CliError> {
    let profile_name = config.resolve_profile_name(profile_name);

    let api_base_url = api_base_url
        .map(normalize_base_url)
        .transpose()
        .map_err(|error| CliError::Config(error.to_string()))?;
    if timeout_secs == Some(0) {
        return Err(CliError::Config(
            "timeout_secs must be at least one second".to_string(),
        ));
    }

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(url) = api_base_url {
        profile.api_base_url = Some(url);
    }
    if let Some(seconds) = timeout_secs {
        profile.request_timeout_secs = Some(seconds);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }
    Ok(profile_name)
}

fn resolve_settings(
    config: &CliProfilesConfig,
    global_profile: Option<&str>,
    api_url: Option<&str>,
    config_path: &str,
) -> Result<ResolvedSettings, CliError> {
    let profile_name = config.resolve_profile_name(global_profile);
    let client_config = config
        .profile(&profile_name)
        .cloned()
        .unwrap_or_default()
        .client_config(api_url)
        .map_err(|error| CliError::Config(error.to_string()))?;

    Ok(ResolvedSettings {
        active: config.active_profile.as_deref() == Some(profile_name.as_str()),
        profile: profile_name,
        config_path: config_path.to_string(),
        api_base_url: client_config.api_base_url,
        request_timeout_secs: client_config.request_timeout_secs,
    })
}
