//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error(
        "Request timeout ({request_secs}s) must exceed the AI retry budget ({ai_budget_secs}s)"
    )]
    RequestTimeoutTooShort { request_secs: u64, ai_budget_secs: u64 },

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid AI timeout")]
    InvalidAiTimeout,

    #[error("AI temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Retry count exceeds maximum allowed (10)")]
    TooManyRetries,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("File storage requires a data directory")]
    MissingDataDir,
}
