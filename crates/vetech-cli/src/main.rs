//! VeTech CLI - your pets, consultations and rewards from the terminal
//!
//! Every command runs against one CLI profile; the session token for that
//! profile lives in the OS keychain.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::CliContext;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::consultations::run_consultations;
use crate::commands::diets::run_diets;
use crate::commands::history::run_history;
use crate::commands::pets::run_pets;
use crate::commands::profile::run_profile;
use crate::commands::requests::run_requests;
use crate::commands::rewards::run_rewards;
use crate::error::CliError;

const LOG_DIRECTIVES: [&str; 2] = ["vetech_core=info", "vetech=info"];

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = LOG_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();
    let api_url = cli.api_url.as_deref();

    let context = || CliContext::load(profile, api_url);

    match cli.command {
        Commands::Auth { command } => run_auth(command, &context()?).await,
        Commands::Pets { command } => run_pets(command, &context()?).await,
        Commands::Consultations { command } => run_consultations(command, &context()?).await,
        Commands::Requests { command } => run_requests(command, &context()?).await,
        Commands::Diets { command } => run_diets(command, &context()?).await,
        Commands::Rewards { command } => run_rewards(command, &context()?).await,
        Commands::Profile { command } => run_profile(command, &context()?).await,
        Commands::History { pet, json } => run_history(&pet, json, &context()?).await,
        Commands::Config { command } => run_config(command, profile, api_url),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}
