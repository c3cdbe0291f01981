//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ESG_ADVISOR` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment loads.
//!
//! # Example
//!
//! ```no_run
//! use esg_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Targets at {}", config.data.kpi_targets_path.display());
//! ```

mod data;
mod error;
mod logging;
mod report;

pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use report::ReportConfig;

use serde::Deserialize;

use crate::application::handlers::ReportSettings;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Dataset and targets file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Report defaults
    #[serde(default)]
    pub report: ReportConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ESG_ADVISOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ESG_ADVISOR__DATA__SENSOR_DATA_PATH=./sensors.json` -> `data.sensor_data_path`
    /// - `ESG_ADVISOR__REPORT__PLANT_NAME=Plant A` -> `report.plant_name`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ESG_ADVISOR")
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
    /// Returns `ValidationError` for empty paths, decimals above the
    /// supported maximum, a non-positive CR threshold or a bad log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Report defaults handed to the tool handlers.
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings::from(&self.report)
    }
}
