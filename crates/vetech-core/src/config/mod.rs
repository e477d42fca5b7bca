//! Client configuration.
//!
//! Provides the `ClientConfig` used by every VeTech interface to reach the
//! veterinary-care backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.15.157:8000";
/// Request timeout applied to every backend call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const API_BASE_URL_ENV: &str = "VETECH_API_BASE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "VETECH_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(&'static str),
    #[error("Invalid request timeout: {0}")]
    InvalidTimeout(String),
}

/// Connection settings for the backend API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ClientConfig {
    /// Builds a validated config for an explicit base URL.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
        .validated()
    }

    /// Reads `VETECH_API_BASE_URL` and `VETECH_TIMEOUT_SECS`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        resolve_client_config(
            std::env::var(API_BASE_URL_ENV).ok(),
            std::env::var(REQUEST_TIMEOUT_ENV).ok(),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Normalizes the base URL and checks the timeout.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(&self.api_base_url)?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Resolve a config from optional raw values (environment, CLI flags).
///
/// Blank values count as unset.
pub fn resolve_client_config(
    api_base_url: Option<String>,
    request_timeout_secs: Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let api_base_url =
        normalize_text_option(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let request_timeout_secs = match normalize_text_option(request_timeout_secs) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|error| ConfigError::InvalidTimeout(format!("'{raw}': {error}")))?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    ClientConfig {
        api_base_url,
        request_timeout_secs,
    }
    .validated()
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ConfigError::InvalidBaseUrl("API base URL must not be empty"));
    }
    if !is_http_url(base) {
        return Err(ConfigError::InvalidBaseUrl(
            "API base URL must include http:// or https://",
        ));
    }
    Ok(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("example.com").is_err());
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn resolve_uses_defaults_for_blank_values() {
        let config = resolve_client_config(Some("  ".to_string()), None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn resolve_rejects_unparseable_timeout() {
        let error = resolve_client_config(None, Some("soon".to_string())).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn validated_rejects_zero_timeout() {
        let config = ClientConfig {
            api_base_url: "https://api.example.com".to_string(),
            request_timeout_secs: 0,
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn config_parses_without_timeout_field() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "api_base_url": "https://api.example.com" }"#).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
