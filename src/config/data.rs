//! Dataset and targets file locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the JSON files live
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Sensor time series, read only
    #[serde(default = "default_sensor_data_path")]
    pub sensor_data_path: PathBuf,

    /// Social KPI records, written by the upsert tool
    #[serde(default = "default_social_data_path")]
    pub social_data_path: PathBuf,

    /// KPI targets, created with defaults when missing
    #[serde(default = "default_kpi_targets_path")]
    pub kpi_targets_path: PathBuf,
}

impl DataConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sensor_data_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.sensor_data_path"));
        }
        if self.social_data_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.social_data_path"));
        }
        if self.kpi_targets_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.kpi_targets_path"));
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sensor_data_path: default_sensor_data_path(),
            social_data_path: default_social_data_path(),
            kpi_targets_path: default_kpi_targets_path(),
        }
    }
}

fn default_sensor_data_path() -> PathBuf {
    PathBuf::from("./data/sensor_timeseries.json")
}

fn default_social_data_path() -> PathBuf {
    PathBuf::from("./data/social_kpis.json")
}

fn default_kpi_targets_path() -> PathBuf {
    PathBuf::from("./data/kpi_targets.json")
}
