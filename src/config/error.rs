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

    #[error("Invalid OptiPass server URL format")]
    InvalidServerUrl,

    #[error("Invalid optimizer timeout (must be 1 to 3600 seconds)")]
    InvalidTimeout,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid initial tab (must be 0 to 4)")]
    InvalidInitialTab,
}
