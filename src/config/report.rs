//! Report defaults

use serde::Deserialize;

use crate::application::handlers::{ReportSettings, MAX_DECIMALS};
use crate::domain::analysis::CR_THRESHOLD;
use crate::domain::foundation::{StatusMapping, StatusMappingPreset};

use super::error::ValidationError;

/// Defaults applied when a tool call leaves an option out
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Decimals of KPI reports and snapshots
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Decimals of the DSS report
    #[serde(default = "default_dss_decimals")]
    pub dss_decimals: u32,

    /// Facility shown on environmental reports ("N/D" when absent)
    #[serde(default)]
    pub plant_name: Option<String>,

    /// Calibrated CO2 ppm field in the sensor dataset
    #[serde(default)]
    pub co2_field: Option<String>,

    /// Status normalization used by the DSS combiner
    #[serde(default)]
    pub status_mapping: StatusMappingPreset,

    /// Consistency ratio above which a matrix is flagged
    #[serde(default = "default_cr_threshold")]
    pub cr_threshold: f64,
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("report.decimals", self.decimals), ("report.dss_decimals", self.dss_decimals)] {
            if value > MAX_DECIMALS {
                return Err(ValidationError::DecimalsTooLarge {
                    field,
                    max: MAX_DECIMALS,
                    actual: value,
                });
            }
        }
        if !self.cr_threshold.is_finite() || self.cr_threshold <= 0.0 {
            return Err(ValidationError::InvalidCrThreshold(self.cr_threshold));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            dss_decimals: default_dss_decimals(),
            plant_name: None,
            co2_field: None,
            status_mapping: StatusMappingPreset::default(),
            cr_threshold: default_cr_threshold(),
        }
    }
}

impl From<&ReportConfig> for ReportSettings {
    fn from(config: &ReportConfig) -> Self {
        Self {
            decimals: config.decimals,
            dss_decimals: config.dss_decimals,
            plant_name: non_blank(config.plant_name.as_deref()),
            co2_field: non_blank(config.co2_field.as_deref()),
            status_mapping: StatusMapping::from(config.status_mapping),
            cr_threshold: config.cr_threshold,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn default_decimals() -> u32 {
    1
}

fn default_dss_decimals() -> u32 {
    2
}

fn default_cr_threshold() -> f64 {
    CR_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_settings() {
        let settings = ReportSettings::from(&ReportConfig::default());
        assert_eq!(settings, ReportSettings::default());
    }

    #[test]
    fn blank_plant_name_is_treated_as_absent() {
        let config = ReportConfig {
            plant_name: Some("   ".into()),
            co2_field: Some("co2_ppm_cal".into()),
            status_mapping: StatusMappingPreset::Snapshot,
            ..ReportConfig::default()
        };
        let settings = ReportSettings::from(&config);
        assert_eq!(settings.plant_name, None);
        assert_eq!(settings.co2_field.as_deref(), Some("co2_ppm_cal"));
        assert!(settings.status_mapping.excludes_not_available());
    }

    #[test]
    fn rejects_too_many_decimals() {
        let config = ReportConfig {
            dss_decimals: 7,
            ..ReportConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DecimalsTooLarge { field: "report.dss_decimals", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_cr_threshold() {
        let config = ReportConfig {
            cr_threshold: 0.0,
            ..ReportConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCrThreshold(0.0)));
    }
}
