//! Report defaults shared by the handlers, and the rendered output type.

use serde::Serialize;
use serde_json::Value;

use crate::domain::analysis::CR_THRESHOLD;
use crate::domain::foundation::{DomainError, ErrorCode, StatusMapping, ValidationError};
use crate::domain::kpi::catalog::CO2_KPI;
use crate::domain::kpi::ReportOptions;

/// Highest `decimals` a request may ask for.
pub const MAX_DECIMALS: u32 = 6;

/// Raw field shown in place of CO2 when no calibrated field is configured.
pub const UNCALIBRATED_CO2_FIELD: &str = "air_quality_raw";
const UNCALIBRATED_CO2_UNIT: &str = "idx_raw";

/// Defaults applied when a request leaves an option out.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub decimals: u32,
    pub dss_decimals: u32,
    /// Facility shown on environmental reports
    pub plant_name: Option<String>,
    /// Calibrated CO2 ppm field in the sensor dataset
    pub co2_field: Option<String>,
    pub status_mapping: StatusMapping,
    pub cr_threshold: f64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            decimals: 1,
            dss_decimals: 2,
            plant_name: None,
            co2_field: None,
            status_mapping: StatusMapping::standard(),
            cr_threshold: CR_THRESHOLD,
        }
    }
}

impl ReportSettings {
    /// Requested decimals, or `default` when absent.
    pub fn decimals_or(requested: Option<u32>, default: u32) -> Result<u32, ValidationError> {
        let decimals = requested.unwrap_or(default);
        if decimals > MAX_DECIMALS {
            return Err(ValidationError::out_of_range(
                "decimals",
                0.0,
                f64::from(MAX_DECIMALS),
                f64::from(decimals),
            ));
        }
        Ok(decimals)
    }

    /// Aggregation options for environmental KPIs. CO2 is read from the
    /// calibrated field when one is known, otherwise the raw air-quality
    /// index is shown unclassified.
    pub fn environment_options(
        &self,
        decimals: u32,
        trend_window_n: usize,
        facility: Option<String>,
        co2_field: Option<&str>,
    ) -> ReportOptions {
        let options = ReportOptions::new(decimals, trend_window_n)
            .with_facility(facility.or_else(|| self.plant_name.clone()));
        match co2_field.or(self.co2_field.as_deref()) {
            Some(field) => options.with_source_field(CO2_KPI, field),
            None => options.with_uncalibrated(CO2_KPI, UNCALIBRATED_CO2_FIELD, UNCALIBRATED_CO2_UNIT),
        }
    }
}

/// Validates an optional trend window length.
pub(crate) fn window_n_or(requested: Option<usize>, default: usize) -> Result<usize, ValidationError> {
    match requested {
        Some(0) => Err(ValidationError::out_of_range("window_n", 1.0, f64::MAX, 0.0)),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

/// Serializes a handler output for the agent.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Serialization failed: {}", e)))
}

/// A report in the requested output mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    Markdown(String),
    Structured(Value),
}

impl ReportOutput {
    pub fn into_value(self) -> Value {
        match self {
            ReportOutput::Markdown(text) => Value::String(text),
            ReportOutput::Structured(value) => value,
        }
    }

    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            ReportOutput::Markdown(text) => Some(text),
            ReportOutput::Structured(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::{EnvironmentRecord, KpiAggregator, KpiTargets};

    #[test]
    fn decimals_above_six_are_rejected() {
        assert_eq!(ReportSettings::decimals_or(None, 1), Ok(1));
        assert_eq!(ReportSettings::decimals_or(Some(3), 1), Ok(3));
        assert!(ReportSettings::decimals_or(Some(7), 1).is_err());
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(window_n_or(None, 5), Ok(5));
        assert!(window_n_or(Some(0), 5).is_err());
    }

    #[test]
    fn co2_without_calibrated_field_is_unclassified() {
        let records = vec![EnvironmentRecord::new("2025-09-15T10:00:00")
            .with_field("air_quality_raw", 256.0)
            .with_field("co2", 650.0)];
        let targets = KpiTargets::default();
        let settings = ReportSettings::default();

        let raw = KpiAggregator::snapshot(
            &records,
            &targets.environment,
            &[CO2_KPI],
            5,
            &settings.environment_options(0, 5, None, None),
        );
        let row = raw.row(CO2_KPI).unwrap();
        assert_eq!(row.current, Some(256.0));
        assert_eq!(row.unit, "idx_raw");
        assert!(!row.status.is_available());

        let calibrated = KpiAggregator::snapshot(
            &records,
            &targets.environment,
            &[CO2_KPI],
            5,
            &settings.environment_options(0, 5, None, Some("co2")),
        );
        let row = calibrated.row(CO2_KPI).unwrap();
        assert_eq!(row.current, Some(650.0));
        assert!(row.status.is_available());
    }

    #[test]
    fn plant_name_is_the_default_facility() {
        let settings = ReportSettings {
            plant_name: Some("Tessitura Nord".into()),
            ..ReportSettings::default()
        };
        let options = settings.environment_options(1, 5, None, None);
        assert_eq!(options.facility.as_deref(), Some("Tessitura Nord"));
    }
}
