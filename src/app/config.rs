use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::infrastructure::error::AppError;
use crate::app::infrastructure::store::FileStore;

/// Application configuration read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the verse provider
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_translation")]
    pub translation: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Overrides where the durable store keeps its files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "https://bible-api.com".to_string()
}

fn default_translation() -> String {
    "almeida".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            translation: default_translation(),
            request_timeout_secs: default_request_timeout_secs(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Load config from disk, or fall back to defaults
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                tracing::warn!(%err, path = %config_path.display(), "invalid config; using defaults");
                Self::default()
            }),
            Err(_) => {
                // File doesn't exist, write defaults so users have something to edit
                let default = Self::default();
                if let Err(err) = default.save() {
                    tracing::debug!(%err, "could not write default config");
                }
                default
            }
        }
    }

    /// Parse and validate a config document
    pub fn from_json(contents: &str) -> Result<Self, AppError> {
        let config: AppConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be positive".to_string()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.translation.trim().is_empty() {
            return Err(AppError::Config("translation must not be empty".to_string()));
        }
        Ok(())
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Directory for the durable store
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(FileStore::default_dir)
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("proposito");
        path.push("config.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://bible-api.com");
        assert_eq!(config.translation, "almeida");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_json(r#"{"translation": "kjv"}"#).unwrap();
        assert_eq!(config.translation, "kjv");
        assert_eq!(config.api_base_url, "https://bible-api.com");
    }

    #[test]
    fn test_data_dir_override() {
        let config = AppConfig::from_json(r#"{"data_dir": "/tmp/proposito-test"}"#).unwrap();
        assert_eq!(config.store_dir(), PathBuf::from("/tmp/proposito-test"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{"request_timeout_secs": 0}"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"api_base_url": "ftp://example.org"}"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(AppConfig::from_json("not json"), Err(AppError::Json(_))));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded = AppConfig::from_json(&json).unwrap();
        assert_eq!(config, loaded);
    }
}
