//! Traffic-light KPI status and its numeric mappings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Classification of a KPI value against its thresholds.
///
/// Variant order is the "worst-first" ranking used when picking
/// recommendations: not-available < red < yellow < green.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    #[default]
    NotAvailable,
    Red,
    Yellow,
    Green,
}

impl KpiStatus {
    /// Ordinal rank: NotAvailable 0, Red 1, Yellow 2, Green 3.
    pub fn rank(&self) -> u8 {
        match self {
            KpiStatus::NotAvailable => 0,
            KpiStatus::Red => 1,
            KpiStatus::Yellow => 2,
            KpiStatus::Green => 3,
        }
    }

    /// Points used when averaging the overall report score.
    pub fn score_points(&self) -> f64 {
        match self {
            KpiStatus::Green => 100.0,
            KpiStatus::Yellow => 80.0,
            KpiStatus::Red => 50.0,
            KpiStatus::NotAvailable => 0.0,
        }
    }

    /// Returns true when the KPI had a value to classify.
    pub fn is_available(&self) -> bool {
        !matches!(self, KpiStatus::NotAvailable)
    }

    /// Returns true for statuses that call for corrective action.
    pub fn needs_improvement(&self) -> bool {
        matches!(self, KpiStatus::Yellow | KpiStatus::Red)
    }

    /// Marker shown in markdown reports.
    pub fn marker(&self) -> &'static str {
        match self {
            KpiStatus::Green => "🟢",
            KpiStatus::Yellow => "🟡",
            KpiStatus::Red => "🔴",
            KpiStatus::NotAvailable => "⚪",
        }
    }
}

impl fmt::Display for KpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KpiStatus::Green => "green",
            KpiStatus::Yellow => "yellow",
            KpiStatus::Red => "red",
            KpiStatus::NotAvailable => "not_available",
        };
        write!(f, "{}", s)
    }
}

/// Named status→[0,1] tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusMappingPreset {
    /// green 1.0, yellow 0.8, red 0.5, not-available 0.0.
    #[default]
    Standard,
    /// green 1.0, yellow 0.6, red 0.2, not-available excluded.
    Snapshot,
}

/// Normalization of a status to a [0,1] contribution for DSS combination.
///
/// `not_available: None` means not-available indicators are excluded from
/// the combination instead of contributing zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusMapping {
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
    #[serde(default)]
    pub not_available: Option<f64>,
}

impl StatusMapping {
    pub fn standard() -> Self {
        Self {
            green: 1.0,
            yellow: 0.8,
            red: 0.5,
            not_available: Some(0.0),
        }
    }

    pub fn snapshot() -> Self {
        Self {
            green: 1.0,
            yellow: 0.6,
            red: 0.2,
            not_available: None,
        }
    }

    /// Normalized value for a status, or `None` if the status is excluded.
    pub fn normalize(&self, status: KpiStatus) -> Option<f64> {
        match status {
            KpiStatus::Green => Some(self.green),
            KpiStatus::Yellow => Some(self.yellow),
            KpiStatus::Red => Some(self.red),
            KpiStatus::NotAvailable => self.not_available,
        }
    }

    /// Returns true when not-available indicators are dropped.
    pub fn excludes_not_available(&self) -> bool {
        self.not_available.is_none()
    }

    /// Every mapped value must lie in [0,1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let entries = [
            ("status_mapping.green", Some(self.green)),
            ("status_mapping.yellow", Some(self.yellow)),
            ("status_mapping.red", Some(self.red)),
            ("status_mapping.not_available", self.not_available),
        ];
        for (field, value) in entries {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ValidationError::out_of_range(field, 0.0, 1.0, v));
                }
            }
        }
        Ok(())
    }
}

impl Default for StatusMapping {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<StatusMappingPreset> for StatusMapping {
    fn from(preset: StatusMappingPreset) -> Self {
        match preset {
            StatusMappingPreset::Standard => Self::standard(),
            StatusMappingPreset::Snapshot => Self::snapshot(),
        }
    }
}

/// Status mapping as supplied by a caller: a preset name or an explicit table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusMappingSpec {
    Preset(StatusMappingPreset),
    Custom(StatusMapping),
}

impl StatusMappingSpec {
    /// Resolves and validates the mapping.
    pub fn resolve(&self) -> Result<StatusMapping, ValidationError> {
        let mapping = match self {
            StatusMappingSpec::Preset(preset) => StatusMapping::from(*preset),
            StatusMappingSpec::Custom(mapping) => *mapping,
        };
        mapping.validate()?;
        Ok(mapping)
    }
}
