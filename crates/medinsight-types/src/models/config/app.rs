//! Application-level configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::hospitals::HospitalConfig;
use super::invoker::InvokerConfig;
use super::upstream::{GeminiConfig, ModelDefaults};
use super::validate_section;
use crate::error::ConfigError;

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[validate(range(min = 1_u16, message = "must be non-zero"))]
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    /// Get the full bind socket address.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Gemini connection settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Retry/backoff bounds
    #[serde(default)]
    pub invoker: InvokerConfig,
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Fallback model lists
    #[serde(default)]
    pub models: ModelDefaults,
    /// Hospital directory for recommendations
    #[serde(default)]
    pub hospitals: HospitalConfig,
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every section; the first failure wins.
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        validate_section("gemini", &self.gemini)?;
        validate_section("invoker", &self.invoker)?;
        validate_section("server", &self.server)?;
        validate_section("models", &self.models)?;
        validate_section("hospitals", &self.hospitals)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub const fn default_port() -> u16 {
    8501
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::new();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.invoker.max_retries, 5);
        assert_eq!(config.invoker.base_delay_ms, 2000);
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"invoker": {"max_retries": 2}}"#).unwrap();
        assert_eq!(config.invoker.max_retries, 2);
        assert_eq!(config.invoker.jitter_max_ms, 1000);
        assert_eq!(config.models.text_fallbacks[0], "gemini-1.5-flash");
    }

    #[test]
    fn test_validation_reports_field() {
        let mut config = AppConfig::new();
        config.invoker.max_retries = 42;
        match config.validate_all() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "invoker.max_retries");
            },
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_hospitals_default_to_unset() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.hospitals.region(), None);
        assert_eq!(config.hospitals.directory(), None);

        let mut config = AppConfig::new();
        config.hospitals.region = "x".repeat(201);
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_zero_base_delay_rejected() {
        let mut config = AppConfig::new();
        config.invoker.base_delay_ms = 0;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let mut config = AppConfig::new();
        config.gemini.api_key = "secret-key-value".to_string();
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("secret-key-value"));
    }
}
