//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PERSONA_SURVEY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use persona_survey::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod features;
mod server;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except the Gemini API key, which
/// [`AppConfig::validate()`] requires.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Repository backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERSONA_SURVEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PERSONA_SURVEY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PERSONA_SURVEY__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERSONA_SURVEY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;

        // The HTTP timeout must not cut off a generation that is still retrying.
        let budget = self.ai.retry_budget();
        if self.server.request_timeout() <= budget {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                ai_budget_secs: budget.as_secs(),
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PERSONA_SURVEY__AI__GEMINI_API_KEY",
        "PERSONA_SURVEY__SERVER__PORT",
        "PERSONA_SURVEY__SERVER__ENVIRONMENT",
        "PERSONA_SURVEY__SERVER__LOG_FORMAT",
        "PERSONA_SURVEY__SERVER__REQUEST_TIMEOUT_SECS",
        "PERSONA_SURVEY__AI__TIMEOUT_SECS",
        "PERSONA_SURVEY__AI__TEMPERATURE",
        "PERSONA_SURVEY__STORAGE__BACKEND",
        "PERSONA_SURVEY__STORAGE__DATA_DIR",
        "PERSONA_SURVEY__FEATURES__RECORD_RESULTS_AS_INTERESTS",
    ];

    fn set_minimal_env() {
        env::set_var("PERSONA_SURVEY__AI__GEMINI_API_KEY", "test-key");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert!(config.ai.has_gemini());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.features.record_results_as_interests);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("PERSONA_SURVEY__SERVER__PORT", "3000"),
            ("PERSONA_SURVEY__SERVER__ENVIRONMENT", "production"),
            ("PERSONA_SURVEY__SERVER__LOG_FORMAT", "json"),
            ("PERSONA_SURVEY__STORAGE__BACKEND", "memory"),
            ("PERSONA_SURVEY__STORAGE__DATA_DIR", "/var/lib/persona"),
            ("PERSONA_SURVEY__FEATURES__RECORD_RESULTS_AS_INTERESTS", "false"),
            ("PERSONA_SURVEY__AI__TEMPERATURE", "0.5"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/persona"));
        assert!(!config.features.record_results_as_interests);
        assert_eq!(config.ai.temperature, Some(0.5));
    }

    #[test]
    fn test_request_timeout_must_cover_ai_retries() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("PERSONA_SURVEY__SERVER__REQUEST_TIMEOUT_SECS", "90"),
            ("PERSONA_SURVEY__AI__TIMEOUT_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request_secs: 90,
                ai_budget_secs: 183,
            })
        );
    }

    #[test]
    fn test_default_timeouts_fit_together() {
        let config = AppConfig {
            ai: AiConfig {
                gemini_api_key: Some(secrecy::Secret::new("k".to_string())),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.server.request_timeout() > config.ai.retry_budget());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
    }
}
