//! Client Configuration
//!
//! The backend address and timeouts are injected at start-up instead of
//! being guessed from the page hostname.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::RetryPolicy;

/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "FOLIO_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Reads, deletes and JSON updates
    pub request_timeout_ms: u64,
    /// Multipart uploads
    pub upload_timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            upload_timeout_ms: 30_000,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }

    /// Base URL without a trailing slash
    pub fn origin(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim().to_ascii_lowercase();
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()))
        }
    }

    /// Load from a JSON file. A missing file yields the defaults; the
    /// environment override is applied last.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&content)?
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.origin(), "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.upload_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry.retries, 3);
    }

    #[test]
    fn test_validate_rejects_relative_base() {
        assert!(ClientConfig::new("https://api.example.com/").validate().is_ok());
        assert!(matches!(
            ClientConfig::new("/api").validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(ClientConfig::new("ftp://host").validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_base_url": "https://backend.example.com", "retry": {"retries": 1, "delay_ms": 5}}"#,
        )
        .unwrap();
        let config = ClientConfig::load(&path).unwrap();
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.origin(), "https://backend.example.com");
        }
        assert_eq!(config.retry, RetryPolicy::new(1, Duration::from_millis(5)));
        assert_eq!(config.upload_timeout_ms, 30_000);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(ClientConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
