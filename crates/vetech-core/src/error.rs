//! Error types for vetech-core

use thiserror::Error;

use crate::auth::claims::ClaimsError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::http::ApiError;

/// Result type alias using vetech-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vetech-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Backend request error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session/authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Token decoding error
    #[error("Token decode error: {0}")]
    Claims(#[from] ClaimsError),

    /// Client configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
