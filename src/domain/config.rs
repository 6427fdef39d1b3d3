//! Config - Application Configuration

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    SEARCH_DEBOUNCE_MS,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API configuration
    pub api: ApiConfig,
    /// Query coordinator defaults
    pub query: QueryConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all resource paths are joined to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Query coordinator defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    /// Search debounce window in milliseconds
    pub debounce_ms: u64,
    /// Default page size
    pub page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: SEARCH_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Write daily-rotated log files here in addition to stderr
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Reject values the stores cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Invalid {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Invalid {
                message: "api.timeout_secs must be positive".to_string(),
            });
        }
        if self.query.page_size == 0 || self.query.page_size > MAX_PAGE_SIZE {
            return Err(Error::Invalid {
                message: format!("query.page_size must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.datahub.example/"

            [query]
            page_size = 100
            "#,
        )
        .expect("parse config");

        assert_eq!(config.api.base_url, "https://api.datahub.example/");
        assert_eq!(config.api.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
        assert_eq!(config.query.page_size, 100);
        assert_eq!(config.query.debounce(), Duration::from_millis(250));
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = AppConfig::default();
        config.query.page_size = 0;
        assert!(config.validate().is_err());
    }
}
