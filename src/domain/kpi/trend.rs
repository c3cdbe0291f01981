//! Trend Estimator.
//!
//! Two formulas are in use and kept apart on purpose: the live snapshots
//! compare the endpoints of a short window, the windowed reports compare the
//! latest value with the mean of the values preceding it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction indicator shown next to a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Trend {
    #[serde(rename = "↗")]
    Up,
    #[serde(rename = "↘")]
    Down,
    #[default]
    #[serde(rename = "→")]
    Flat,
    /// No current value to compare.
    #[serde(rename = "—")]
    Unknown,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Flat => "→",
            Trend::Unknown => "—",
        }
    }

    fn from_delta(delta: f64, epsilon: f64) -> Self {
        if delta > epsilon {
            Trend::Up
        } else if delta < -epsilon {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

pub struct TrendEstimator;

impl TrendEstimator {
    /// `series[last] - series[0]` against `epsilon`. Series is oldest first.
    pub fn endpoint_slope(series: &[f64], epsilon: f64) -> Trend {
        let points: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => Trend::from_delta(last - first, epsilon),
            _ => Trend::Flat,
        }
    }

    /// Latest value against the mean of up to `window_n` values before it.
    ///
    /// Series is oldest first; the last element is the current value.
    pub fn current_vs_trailing_mean(series: &[f64], window_n: usize, epsilon: f64) -> Trend {
        let points: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((current, previous)) = points.split_last() else {
            return Trend::Flat;
        };
        let start = previous.len().saturating_sub(window_n);
        let trailing = &previous[start..];
        if trailing.is_empty() {
            return Trend::Flat;
        }
        let mean = trailing.iter().sum::<f64>() / trailing.len() as f64;
        Trend::from_delta(current - mean, epsilon)
    }
}
