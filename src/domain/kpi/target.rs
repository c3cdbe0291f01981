//! KPI target definitions as stored in the targets file.
//!
//! A target is either center-band (`target` ± `tol`, with a `yellow_extra`
//! margin on each side) or range-band (`green` interval, optional `yellow`
//! intervals and hard `limits`). Social targets also carry a `direction`.
//! Fields this crate does not interpret are preserved on round-trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

pub const DEFAULT_TREND_EPSILON: f64 = 0.1;
pub const DEFAULT_ENV_WINDOW_N: usize = 5;
pub const DEFAULT_SOCIAL_WINDOW_N: usize = 3;
pub const DEFAULT_SATISFACTION_SCALE: f64 = 100.0;

/// Closed numeric interval `[lo, hi]`, stored as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Band {
    pub lo: f64,
    pub hi: f64,
}

impl Band {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(ValidationError::invalid_format(field, "bounds must be finite numbers"));
        }
        if self.lo > self.hi {
            return Err(ValidationError::invalid_format(
                field,
                format!("min {} is greater than max {}", self.lo, self.hi),
            ));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Band {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Band> for [f64; 2] {
    fn from(band: Band) -> Self {
        [band.lo, band.hi]
    }
}

/// Yellow bands may be written as one interval or as a list of intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YellowBands {
    Single(Band),
    Many(Vec<Band>),
}

impl YellowBands {
    pub fn bands(&self) -> &[Band] {
        match self {
            YellowBands::Single(band) => std::slice::from_ref(band),
            YellowBands::Many(bands) => bands,
        }
    }
}

/// How a social range target is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Lower,
    Higher,
    Center,
    HigherInteger,
}

/// Threshold definition for one KPI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yellow_extra: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yellow: Option<YellowBands>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetDefinition {
    /// Range-band target.
    pub fn range(green: [f64; 2], yellow: &[[f64; 2]]) -> Self {
        Self {
            green: Some(Band::from(green)),
            yellow: Some(YellowBands::Many(
                yellow.iter().copied().map(Band::from).collect(),
            )),
            ..Self::default()
        }
    }

    /// Center-band target.
    pub fn center(target: f64, tol: f64, yellow_extra: f64) -> Self {
        Self {
            target: Some(target),
            tol: Some(tol),
            yellow_extra: Some(yellow_extra),
            ..Self::default()
        }
    }

    /// Unit-only target: reportable, never classified.
    pub fn unit_only(unit: &str) -> Self {
        Self::default().with_unit(unit)
    }

    pub fn with_limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = Some(Band::new(lo, hi));
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Center-band form is used when both `target` and `tol` are present.
    pub fn center_band(&self) -> Option<(f64, f64, f64)> {
        match (self.target, self.tol) {
            (Some(target), Some(tol)) => Some((target, tol, self.yellow_extra.unwrap_or(0.0))),
            _ => None,
        }
    }

    /// True when the target can classify a value.
    pub fn has_thresholds(&self) -> bool {
        self.center_band().is_some() || self.green.is_some()
    }

    pub fn yellow_bands(&self) -> &[Band] {
        self.yellow.as_ref().map(YellowBands::bands).unwrap_or(&[])
    }

    /// Human-readable target, e.g. `24–30 °C`, `120 ± 5 mm`, `≤ 10 %`.
    pub fn describe(&self, unit: &str) -> String {
        let suffix = if unit.is_empty() {
            String::new()
        } else {
            format!(" {}", unit)
        };

        if let Some((target, tol, _)) = self.center_band() {
            return format!("{} ± {}{}", target, tol, suffix);
        }
        let Some(green) = self.green else {
            return "N/D".to_string();
        };
        match self.direction {
            Some(Direction::Lower) => format!("≤ {}{}", green.hi, suffix),
            Some(Direction::Higher) | Some(Direction::HigherInteger) => {
                format!("≥ {}{}", green.lo, suffix)
            }
            Some(Direction::Center) | None => format!("{}–{}{}", green.lo, green.hi, suffix),
        }
    }

    /// Checks every interval is well formed and the numeric parameters are sane.
    pub fn validate(&self, kpi: &str) -> Result<(), ValidationError> {
        if let Some(green) = &self.green {
            green.validate(&format!("{}.green", kpi))?;
        }
        for (i, band) in self.yellow_bands().iter().enumerate() {
            band.validate(&format!("{}.yellow[{}]", kpi, i))?;
        }
        if let Some(limits) = &self.limits {
            limits.validate(&format!("{}.limits", kpi))?;
        }
        if let Some(tol) = self.tol {
            if tol < 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.tol", kpi),
                    0.0,
                    f64::MAX,
                    tol,
                ));
            }
        }
        if let Some(extra) = self.yellow_extra {
            if extra < 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.yellow_extra", kpi),
                    0.0,
                    f64::MAX,
                    extra,
                ));
            }
        }
        if let Some(scale) = self.scale {
            if scale <= 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.scale", kpi),
                    f64::MIN_POSITIVE,
                    f64::MAX,
                    scale,
                ));
            }
        }
        Ok(())
    }
}

/// One section of the targets file (`environment` or `social`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_epsilon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_window_n: Option<usize>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, TargetDefinition>,
}

impl TargetSection {
    pub fn get(&self, kpi: &str) -> Option<&TargetDefinition> {
        self.metrics.get(kpi)
    }

    pub fn insert(&mut self, kpi: impl Into<String>, target: TargetDefinition) {
        self.metrics.insert(kpi.into(), target);
    }

    /// True when the KPI has a target able to classify values.
    pub fn has_thresholds(&self, kpi: &str) -> bool {
        self.get(kpi).is_some_and(TargetDefinition::has_thresholds)
    }

    pub fn trend_epsilon(&self) -> f64 {
        self.trend_epsilon.unwrap_or(DEFAULT_TREND_EPSILON)
    }

    pub fn trend_window_n(&self, default: usize) -> usize {
        self.trend_window_n.unwrap_or(default)
    }

    pub fn validate(&self, section: &str) -> Result<(), ValidationError> {
        if let Some(eps) = self.trend_epsilon {
            if !eps.is_finite() || eps < 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("{}.trend_epsilon", section),
                    0.0,
                    f64::MAX,
                    eps,
                ));
            }
        }
        if self.trend_window_n == Some(0) {
            return Err(ValidationError::out_of_range(
                format!("{}.trend_window_n", section),
                1.0,
                f64::MAX,
                0.0,
            ));
        }
        for (kpi, target) in &self.metrics {
            target.validate(&format!("{}.{}", section, kpi))?;
        }
        Ok(())
    }
}

/// The whole targets file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTargets {
    #[serde(default)]
    pub environment: TargetSection,
    #[serde(default)]
    pub social: TargetSection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KpiTargets {
    pub fn env_window_n(&self) -> usize {
        self.environment.trend_window_n(DEFAULT_ENV_WINDOW_N)
    }

    pub fn social_window_n(&self) -> usize {
        self.social.trend_window_n(DEFAULT_SOCIAL_WINDOW_N)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.environment.validate("environment")?;
        self.social.validate("social")
    }
}

impl Default for KpiTargets {
    /// The targets written when no targets file exists yet.
    fn default() -> Self {
        let mut environment = TargetSection {
            trend_epsilon: Some(DEFAULT_TREND_EPSILON),
            trend_window_n: Some(DEFAULT_ENV_WINDOW_N),
            metrics: BTreeMap::new(),
        };
        environment.insert(
            "temperature",
            TargetDefinition::range([24.0, 30.0], &[[20.0, 24.0], [30.0, 32.0]])
                .with_limits(20.0, 35.0)
                .with_unit("°C"),
        );
        environment.insert(
            "humidity",
            TargetDefinition::range([50.0, 65.0], &[[45.0, 50.0], [65.0, 70.0]])
                .with_limits(30.0, 80.0)
                .with_unit("%"),
        );
        environment.insert(
            "light",
            TargetDefinition::range([80.0, 100.0], &[[70.0, 80.0], [100.0, 110.0]]).with_unit("lux"),
        );
        environment.insert(
            "distance_mm",
            TargetDefinition::center(120.0, 5.0, 5.0).with_unit("mm"),
        );
        environment.insert(
            "vibration_g",
            TargetDefinition::range([0.2, 1.0], &[[0.0, 0.2], [1.0, 1.5]])
                .with_limits(0.0, 99.0)
                .with_unit("g"),
        );
        environment.insert(
            "co2_ppm",
            TargetDefinition::range([0.0, 700.0], &[[700.0, 1000.0]])
                .with_limits(0.0, 100000.0)
                .with_unit("ppm"),
        );
        environment.insert("energy_specific", TargetDefinition::unit_only("kWh/kg"));
        environment.insert("water_specific", TargetDefinition::unit_only("L/kg"));
        environment.insert("co2eq_ratio", TargetDefinition::unit_only("%"));

        let mut social = TargetSection {
            trend_epsilon: Some(DEFAULT_TREND_EPSILON),
            trend_window_n: Some(DEFAULT_SOCIAL_WINDOW_N),
            metrics: BTreeMap::new(),
        };
        let social_defaults: [(&str, [f64; 2], &[[f64; 2]], Direction); 10] = [
            ("turnover_pct", [0.0, 10.0], &[[10.0, 15.0]], Direction::Lower),
            (
                "training_hours_per_employee_y",
                [24.0, 1000.0],
                &[[12.0, 24.0]],
                Direction::Higher,
            ),
            ("satisfaction_index", [80.0, 100.0], &[[70.0, 80.0]], Direction::Higher),
            ("absenteeism_pct", [0.0, 3.0], &[[3.0, 5.0]], Direction::Lower),
            (
                "gender_female_pct",
                [40.0, 60.0],
                &[[30.0, 40.0], [60.0, 70.0]],
                Direction::Center,
            ),
            ("accidents_per_1000h", [0.0, 0.5], &[[0.5, 1.0]], Direction::Lower),
            (
                "salary_vs_benchmark_pct",
                [100.0, 1000.0],
                &[[95.0, 100.0]],
                Direction::Higher,
            ),
            ("ethical_suppliers_pct", [80.0, 100.0], &[[60.0, 80.0]], Direction::Higher),
            (
                "overtime_hours_per_employee_m",
                [0.0, 10.0],
                &[[10.0, 20.0]],
                Direction::Lower,
            ),
            (
                "community_projects_count",
                [2.0, 1000.0],
                &[[1.0, 1.0]],
                Direction::HigherInteger,
            ),
        ];
        for (kpi, green, yellow, direction) in social_defaults {
            let mut target = TargetDefinition::range(green, yellow).with_direction(direction);
            if kpi == "satisfaction_index" {
                target = target.with_scale(DEFAULT_SATISFACTION_SCALE);
            }
            social.insert(kpi, target);
        }

        Self {
            environment,
            social,
            extra: Map::new(),
        }
    }
}
