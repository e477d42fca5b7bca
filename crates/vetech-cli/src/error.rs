use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] vetech_core::Error),
    #[error(transparent)]
    Api(#[from] vetech_core::ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Profile '{0}' is not signed in. Run `vetech auth login --email <EMAIL> --password <PASSWORD>` first.")]
    NotSignedIn(String),
    #[error("{0}")]
    InvalidInput(String),
}
