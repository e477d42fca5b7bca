//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vetech_core::config::{
    resolve_client_config, ConfigError, API_BASE_URL_ENV, REQUEST_TIMEOUT_ENV,
};
use vetech_core::util::normalize_text_option;
use vetech_core::ClientConfig;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const PROFILE_ENV: &str = "VETECH_PROFILE";
const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("vetech").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    normalize_text_option(value.map(str::to_string))
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Explicit flag, then `VETECH_PROFILE`, then the active profile.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        normalize_profile_name(explicit)
            .or_else(|| normalize_profile_name(std::env::var(PROFILE_ENV).ok().as_deref()))
            .or_else(|| normalize_profile_name(self.active_profile.as_deref()))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    /// Client settings for this profile, with `--api-url` and the
    /// `VETECH_API_BASE_URL` / `VETECH_TIMEOUT_SECS` environment taking
    /// precedence.
    pub fn client_config(&self, api_url_override: Option<&str>) -> Result<ClientConfig, ConfigError> {
        self.client_config_with_env(
            api_url_override,
            std::env::var(API_BASE_URL_ENV).ok(),
            std::env::var(REQUEST_TIMEOUT_ENV).ok(),
        )
    }

    pub fn client_config_with_env(
        &self,
        api_url_override: Option<&str>,
        env_base_url: Option<String>,
        env_timeout: Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let api_base_url = normalize_text_option(api_url_override.map(str::to_string))
            .or_else(|| normalize_text_option(env_base_url))
            .or_else(|| self.api_base_url.clone());
        let request_timeout_secs = normalize_text_option(env_timeout).or_else(|| {
            self.request_timeout_secs
                .map(|seconds| seconds.to_string())
        });
        resolve_client_config(api_base_url, request_timeout_secs)
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.clone());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vetech_core::config::DEFAULT_API_BASE_URL;

    use super::*;

    #[test]
    fn normalize_profile_name_rejects_empty() {
        assert_eq!(normalize_profile_name(None), None);
        assert_eq!(normalize_profile_name(Some(" ")), None);
        assert_eq!(normalize_profile_name(Some(" casa ")), Some("casa".to_string()));
    }

    #[test]
    fn config_roundtrip_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = CliProfilesConfig {
            version: 1,
            active_profile: Some(" clinica ".to_string()),
            profiles: BTreeMap::new(),
        };
        config.profiles.insert(
            "clinica".to_string(),
            CliProfile {
                api_base_url: Some(" https://api.vetech.example ".to_string()),
                request_timeout_secs: Some(30),
            },
        );

        config.save_to_path(&path).unwrap();
        let loaded = CliProfilesConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.active_profile.as_deref(), Some("clinica"));
        let profile = loaded.profile("clinica").unwrap();
        assert_eq!(
            profile.api_base_url.as_deref(),
            Some("https://api.vetech.example")
        );
        assert_eq!(profile.request_timeout_secs, Some(30));
    }

    #[test]
    fn missing_config_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CliProfilesConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, CliProfilesConfig::default());
    }

    #[test]
    fn resolve_profile_name_prefers_explicit_then_active() {
        let config = CliProfilesConfig {
            version: 1,
            active_profile: Some("work".to_string()),
            profiles: BTreeMap::new(),
        };
        assert_eq!(config.resolve_profile_name(Some("mobile")), "mobile");
        assert_eq!(config.resolve_profile_name(None), "work");
    }

    #[test]
    fn client_config_precedence() {
        let profile = CliProfile {
            api_base_url: Some("https://profile.example".to_string()),
            request_timeout_secs: Some(20),
        };

        let from_profile = profile.client_config_with_env(None, None, None).unwrap();
        assert_eq!(from_profile.api_base_url, "https://profile.example");
        assert_eq!(from_profile.request_timeout_secs, 20);

        let from_env = profile
            .client_config_with_env(
                None,
                Some("https://env.example/".to_string()),
                Some("5".to_string()),
            )
            .unwrap();
        assert_eq!(from_env.api_base_url, "https://env.example");
        assert_eq!(from_env.request_timeout_secs, 5);

        let from_flag = profile
            .client_config_with_env(
                Some("http://localhost:8000"),
                Some("https://env.example".to_string()),
                None,
            )
            .unwrap();
        assert_eq!(from_flag.api_base_url, "http://localhost:8000");

        let defaults = CliProfile::default()
            .client_config_with_env(None, None, None)
            .unwrap();
        assert_eq!(defaults.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn client_config_rejects_bad_url() {
        let profile = CliProfile {
            api_base_url: Some("ftp://nope".to_string()),
            request_timeout_secs: None,
        };
        assert!(profile.client_config_with_env(None, None, None).is_err());
    }
}
