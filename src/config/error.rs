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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Decimals must be at most {max}, got {actual} for {field}")]
    DecimalsTooLarge {
        field: &'static str,
        max: u32,
        actual: u32,
    },

    #[error("CR threshold must be a positive number, got {0}")]
    InvalidCrThreshold(f64),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
