//! Threshold Classifier - maps a KPI value and its target to a status.

use crate::domain::foundation::KpiStatus;

use super::target::{Direction, TargetDefinition, DEFAULT_SATISFACTION_SCALE};

/// Stateless classifier over target definitions.
pub struct ThresholdClassifier;

impl ThresholdClassifier {
    /// Classifies a value.
    ///
    /// Missing or non-finite values, and targets without thresholds, are
    /// not-available. All interval tests are inclusive of both endpoints.
    pub fn classify(value: Option<f64>, target: &TargetDefinition) -> KpiStatus {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return KpiStatus::NotAvailable;
        };

        if let Some((center, tol, extra)) = target.center_band() {
            return Self::classify_center_band(value, center, tol, extra);
        }

        let Some(green) = target.green else {
            return KpiStatus::NotAvailable;
        };

        let is_green = match target.direction {
            Some(Direction::Lower) => value <= green.hi,
            Some(Direction::Higher) | Some(Direction::HigherInteger) => value >= green.lo,
            Some(Direction::Center) | None => green.contains(value),
        };
        if is_green {
            return KpiStatus::Green;
        }

        if target.yellow_bands().iter().any(|band| band.contains(value)) {
            return KpiStatus::Yellow;
        }

        KpiStatus::Red
    }

    fn classify_center_band(value: f64, center: f64, tol: f64, extra: f64) -> KpiStatus {
        let green_lo = center - tol;
        let green_hi = center + tol;
        if green_lo <= value && value <= green_hi {
            KpiStatus::Green
        } else if (green_lo - extra <= value && value <= green_lo)
            || (green_hi <= value && value <= green_hi + extra)
        {
            KpiStatus::Yellow
        } else {
            KpiStatus::Red
        }
    }

    /// Rescales a value reported on `source_scale` to the target's scale.
    ///
    /// Targets without a `scale` are taken to be on a 0–100 scale. A
    /// non-positive source scale leaves the value untouched.
    pub fn rescale(value: f64, source_scale: f64, target: &TargetDefinition) -> f64 {
        if source_scale <= 0.0 {
            return value;
        }
        let target_scale = target.scale.unwrap_or(DEFAULT_SATISFACTION_SCALE);
        value * (target_scale / source_scale)
    }
}
