//! KPI Aggregator - turns a record window into classified, trended, scored rows.
//!
//! Two variants share the row model:
//! - [`KpiAggregator::aggregate`]: windowed report, current value is the mean
//!   over the window and the trend compares the latest value with the
//!   trailing mean.
//! - [`KpiAggregator::snapshot`]: live view, current value is the latest
//!   record and the trend is the endpoint slope over the last `window_n`.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::KpiStatus;

use super::catalog::{self, Recommendation};
use super::classifier::ThresholdClassifier;
use super::record::{KpiSource, TimeKeyed};
use super::target::{TargetDefinition, TargetSection};
use super::trend::{Trend, TrendEstimator};
use super::window::{SelectedWindow, WindowSelection, WindowSelector};

const RECOMMENDATION_COUNT: usize = 3;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Overall score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Eccellente,
    Buono,
    Critico,
}

impl ScoreBand {
    /// ≥90 Eccellente, ≥70 Buono, otherwise Critico.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ScoreBand::Eccellente
        } else if score >= 70.0 {
            ScoreBand::Buono
        } else {
            ScoreBand::Critico
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            ScoreBand::Eccellente => "🟢",
            ScoreBand::Buono => "🟡",
            ScoreBand::Critico => "🔴",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreBand::Eccellente => "Eccellente",
            ScoreBand::Buono => "Buono",
            ScoreBand::Critico => "Critico",
        };
        write!(f, "{}", s)
    }
}

/// A KPI whose value is shown but cannot be classified, with the field and
/// unit it is read from instead.
#[derive(Debug, Clone, PartialEq)]
struct UncalibratedField {
    kpi: String,
    field: String,
    unit: String,
}

/// Per-call aggregation options.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub decimals: u32,
    pub facility: Option<String>,
    pub trend_window_n: usize,
    source_fields: Vec<(String, String)>,
    uncalibrated: Vec<UncalibratedField>,
}

impl ReportOptions {
    pub fn new(decimals: u32, trend_window_n: usize) -> Self {
        Self {
            decimals,
            facility: None,
            trend_window_n,
            source_fields: Vec::new(),
            uncalibrated: Vec::new(),
        }
    }

    pub fn with_facility(mut self, facility: Option<String>) -> Self {
        self.facility = facility;
        self
    }

    /// Reads `kpi` from a differently named record field.
    pub fn with_source_field(mut self, kpi: impl Into<String>, field: impl Into<String>) -> Self {
        self.source_fields.push((kpi.into(), field.into()));
        self
    }

    /// Shows `kpi` from a raw field without classifying it.
    pub fn with_uncalibrated(
        mut self,
        kpi: impl Into<String>,
        field: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        self.uncalibrated.push(UncalibratedField {
            kpi: kpi.into(),
            field: field.into(),
            unit: unit.into(),
        });
        self
    }

    fn source_field<'a>(&'a self, kpi: &'a str) -> &'a str {
        self.source_fields
            .iter()
            .find(|(k, _)| k == kpi)
            .map(|(_, field)| field.as_str())
            .unwrap_or(kpi)
    }

    fn uncalibrated(&self, kpi: &str) -> Option<&UncalibratedField> {
        self.uncalibrated.iter().find(|u| u.kpi == kpi)
    }
}

/// One KPI line of a report or snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    #[serde(skip)]
    pub key: String,
    pub label: String,
    pub current: Option<f64>,
    pub unit: String,
    pub display: String,
    pub target: String,
    pub status: KpiStatus,
    pub trend: Trend,
}

/// Reporting period covered by a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ReportPeriod {
    fn of<R: TimeKeyed>(window: &SelectedWindow<R>) -> Self {
        let (start, end) = window.bounds();
        Self { start, end }
    }
}

fn serialize_rows<S: Serializer>(rows: &[KpiRow], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(rows.iter().map(|row| (row.key.as_str(), row)))
}

/// Windowed KPI report. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub period: ReportPeriod,
    pub facility: Option<String>,
    #[serde(serialize_with = "serialize_rows")]
    pub kpis: Vec<KpiRow>,
    pub score_overall: f64,
    pub score_band: ScoreBand,
    pub areas_of_excellence: Vec<String>,
    pub areas_of_improvement: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl KpiReport {
    pub fn row(&self, key: &str) -> Option<&KpiRow> {
        self.kpis.iter().find(|row| row.key == key)
    }

    /// True when no KPI had a value.
    pub fn has_no_data(&self) -> bool {
        self.kpis.iter().all(|row| !row.status.is_available())
    }
}

/// Window used by a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotWindow {
    pub from: Option<String>,
    pub to: Option<String>,
    pub used_last_n: usize,
}

/// Live KPI view over the latest record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub window: SnapshotWindow,
    pub period: ReportPeriod,
    pub facility: Option<String>,
    #[serde(serialize_with = "serialize_rows")]
    pub kpis: Vec<KpiRow>,
    /// `None` when no KPI could be classified.
    pub score: Option<f64>,
    pub score_band: Option<ScoreBand>,
    pub missing_fields: Vec<String>,
    pub targets_used: TargetSection,
}

impl KpiSnapshot {
    pub fn row(&self, key: &str) -> Option<&KpiRow> {
        self.kpis.iter().find(|row| row.key == key)
    }
}

pub struct KpiAggregator;

impl KpiAggregator {
    /// Windowed report over `kpi_order`.
    pub fn aggregate<R: TimeKeyed + KpiSource>(
        window: &SelectedWindow<R>,
        section: &TargetSection,
        kpi_order: &[&str],
        options: &ReportOptions,
    ) -> KpiReport {
        let epsilon = section.trend_epsilon();
        let kpis: Vec<KpiRow> = kpi_order
            .iter()
            .map(|key| {
                let target = section.get(key);
                let uncalibrated = options.uncalibrated(key);
                let field = uncalibrated
                    .map(|u| u.field.as_str())
                    .unwrap_or_else(|| options.source_field(key));
                let series = Self::series(window, field, target);
                let current = mean(&series);
                let trend = match current {
                    Some(_) => TrendEstimator::current_vs_trailing_mean(
                        &series,
                        options.trend_window_n,
                        epsilon,
                    ),
                    None => Trend::Unknown,
                };
                Self::build_row(key, target, current, trend, uncalibrated, options.decimals)
            })
            .collect();

        let summary = Summary::of(&kpis, options.decimals);
        KpiReport {
            period: ReportPeriod::of(window),
            facility: Self::facility(window, options),
            kpis,
            score_overall: summary.score.unwrap_or(0.0),
            score_band: summary.band.unwrap_or(ScoreBand::Critico),
            areas_of_excellence: summary.excellence,
            areas_of_improvement: summary.improvement,
            recommendations: summary.recommendations,
        }
    }

    /// Live snapshot over the most recent `window_n` records.
    pub fn snapshot<R: TimeKeyed + KpiSource + Clone>(
        records: &[R],
        section: &TargetSection,
        kpi_order: &[&str],
        window_n: usize,
        options: &ReportOptions,
    ) -> KpiSnapshot {
        let last = window_n.max(1) - 1;
        let window = WindowSelector::select(records, &WindowSelection::by_index(0, last));
        let epsilon = section.trend_epsilon();
        let latest = window.newest();

        let kpis: Vec<KpiRow> = kpi_order
            .iter()
            .map(|key| {
                let target = section.get(key);
                let uncalibrated = options.uncalibrated(key);
                let field = uncalibrated
                    .map(|u| u.field.as_str())
                    .unwrap_or_else(|| options.source_field(key));
                let current = latest.and_then(|record| Self::value_of(record, field, target));
                let trend = match uncalibrated {
                    Some(_) => Trend::Flat,
                    None => TrendEstimator::endpoint_slope(&Self::series(&window, field, target), epsilon),
                };
                Self::build_row(key, target, current, trend, uncalibrated, options.decimals)
            })
            .collect();

        let summary = Summary::of(&kpis, options.decimals);
        let missing_fields = kpis
            .iter()
            .filter(|row| row.current.is_none())
            .map(|row| row.key.clone())
            .collect();
        let (from, to) = (
            window.oldest().map(|r| r.time_key().to_string()),
            window.newest().map(|r| r.time_key().to_string()),
        );
        let period = ReportPeriod {
            start: latest.map(|r| r.time_key().to_string()),
            end: latest.map(|r| r.period_end_key().to_string()),
        };

        KpiSnapshot {
            window: SnapshotWindow {
                from,
                to,
                used_last_n: window.len(),
            },
            period,
            facility: Self::facility(&window, options),
            kpis,
            score: summary.score,
            score_band: summary.band,
            missing_fields,
            targets_used: section.clone(),
        }
    }

    fn facility<R: TimeKeyed + KpiSource>(window: &SelectedWindow<R>, options: &ReportOptions) -> Option<String> {
        options
            .facility
            .clone()
            .or_else(|| window.newest().and_then(|r| r.facility()).map(str::to_string))
    }

    /// Value of `field` on a record, rescaled to the target's scale when the
    /// record carries one.
    fn value_of<R: KpiSource>(record: &R, field: &str, target: Option<&TargetDefinition>) -> Option<f64> {
        let value = record.kpi_value(field)?;
        match (record.value_scale(field), target) {
            (Some(source_scale), Some(target)) => {
                Some(ThresholdClassifier::rescale(value, source_scale, target))
            }
            _ => Some(value),
        }
    }

    /// Oldest-first numeric series of a field across the window.
    fn series<R: TimeKeyed + KpiSource>(
        window: &SelectedWindow<R>,
        field: &str,
        target: Option<&TargetDefinition>,
    ) -> Vec<f64> {
        window
            .chronological()
            .filter_map(|record| Self::value_of(record, field, target))
            .collect()
    }

    fn build_row(
        key: &str,
        target: Option<&TargetDefinition>,
        current: Option<f64>,
        trend: Trend,
        uncalibrated: Option<&UncalibratedField>,
        decimals: u32,
    ) -> KpiRow {
        let unit = match uncalibrated {
            Some(u) => u.unit.clone(),
            None => unit_for(key, target),
        };
        let status = match (uncalibrated, target) {
            (None, Some(target)) => ThresholdClassifier::classify(current, target),
            _ => KpiStatus::NotAvailable,
        };
        let current = current.map(|v| round_to(v, decimals));
        let display = match current {
            Some(v) if unit.is_empty() => format!("{:.*}", decimals as usize, v),
            Some(v) => format!("{:.*} {}", decimals as usize, v, unit),
            None => "N/D".to_string(),
        };
        let target_text = target
            .map(|t| t.describe(&unit_for(key, Some(t))))
            .unwrap_or_else(|| "N/D".to_string());

        KpiRow {
            key: key.to_string(),
            label: catalog::label(key).to_string(),
            current,
            unit,
            display,
            target: target_text,
            status,
            trend,
        }
    }
}

/// Unit from the target, a `/scale` marker for scaled indices, or the catalog default.
fn unit_for(key: &str, target: Option<&TargetDefinition>) -> String {
    if let Some(unit) = target.and_then(|t| t.unit.as_deref()) {
        return unit.to_string();
    }
    if let Some(scale) = target.and_then(|t| t.scale) {
        return format!("/{}", scale);
    }
    catalog::default_unit(key).to_string()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Score, band, lists and recommendations derived from classified rows.
struct Summary {
    score: Option<f64>,
    band: Option<ScoreBand>,
    excellence: Vec<String>,
    improvement: Vec<String>,
    recommendations: Vec<Recommendation>,
}

impl Summary {
    fn of(rows: &[KpiRow], decimals: u32) -> Self {
        let points: Vec<f64> = rows
            .iter()
            .filter(|row| row.status.is_available())
            .map(|row| row.status.score_points())
            .collect();
        let score = mean(&points).map(|s| round_to(s, decimals));

        let excellence = rows
            .iter()
            .filter(|row| row.status == KpiStatus::Green)
            .map(|row| row.label.clone())
            .collect();
        let improvement = rows
            .iter()
            .filter(|row| row.status.needs_improvement())
            .map(|row| row.label.clone())
            .collect();

        Self {
            score,
            band: score.map(ScoreBand::from_score),
            excellence,
            improvement,
            recommendations: recommendations(rows),
        }
    }
}

/// The three worst yellow/red KPIs in KPI order, extended by any KPI tied
/// with the third, then padded with generic fillers up to three.
fn recommendations(rows: &[KpiRow]) -> Vec<Recommendation> {
    let mut candidates: Vec<&KpiRow> = rows
        .iter()
        .filter(|row| row.status.needs_improvement())
        .collect();
    // stable: ties keep KPI order
    candidates.sort_by_key(|row| row.status.rank());

    let cutoff = candidates
        .get(RECOMMENDATION_COUNT - 1)
        .map(|row| row.status.rank());
    let selected = candidates.iter().enumerate().filter(|(i, row)| {
        *i < RECOMMENDATION_COUNT || Some(row.status.rank()) == cutoff
    });

    let mut out: Vec<Recommendation> = selected
        .filter_map(|(_, row)| catalog::suggestion(&row.key))
        .collect();

    let mut fillers = catalog::generic_fillers().into_iter();
    while out.len() < RECOMMENDATION_COUNT {
        match fillers.next() {
            Some(filler) => out.push(filler),
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::catalog::{ENV_REPORT_KPIS, SOCIAL_KPIS};
    use crate::domain::kpi::record::{EnvironmentRecord, SocialRecord};
    use crate::domain::kpi::target::KpiTargets;

    fn env_window(temps: &[f64]) -> SelectedWindow<EnvironmentRecord> {
        let records: Vec<EnvironmentRecord> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                EnvironmentRecord::new(format!("2025-09-15T10:{:02}:00", i))
                    .with_field("temperature", *t)
                    .with_field("humidity", 55.0)
            })
            .collect();
        WindowSelector::select(&records, &WindowSelection::default())
    }

    #[test]
    fn empty_window_scores_zero_with_three_fillers() {
        let targets = KpiTargets::default();
        let window: SelectedWindow<EnvironmentRecord> = SelectedWindow::new(Vec::new());
        let report = KpiAggregator::aggregate(
            &window,
            &targets.environment,
            ENV_REPORT_KPIS,
            &ReportOptions::new(1, 5),
        );

        assert_eq!(report.score_overall, 0.0);
        assert_eq!(report.score_band, ScoreBand::Critico);
        assert!(report.kpis.iter().all(|r| r.status == KpiStatus::NotAvailable));
        assert!(report.kpis.iter().all(|r| r.trend == Trend::Unknown));
        assert_eq!(report.recommendations, catalog::generic_fillers());
        assert!(report.has_no_data());
        assert_eq!(report.period, ReportPeriod::default());
    }

    #[test]
    fn current_value_is_window_mean() {
        let targets = KpiTargets::default();
        let report = KpiAggregator::aggregate(
            &env_window(&[20.0, 24.0, 28.0]),
            &targets.environment,
            ENV_REPORT_KPIS,
            &ReportOptions::new(1, 5),
        );
        let temp = report.row("temperature").unwrap();
        assert_eq!(temp.current, Some(24.0));
        assert_eq!(temp.status, KpiStatus::Green);
        assert_eq!(temp.display, "24.0 °C");
        assert_eq!(temp.target, "24–30 °C");
        // 28 vs mean(20, 24) = 22
        assert_eq!(temp.trend, Trend::Up);
    }

    #[test]
    fn not_available_kpis_are_excluded_from_score() {
        let targets = KpiTargets::default();
        let report = KpiAggregator::aggregate(
            &env_window(&[22.0]),
            &targets.environment,
            ENV_REPORT_KPIS,
            &ReportOptions::new(1, 5),
        );
        // temperature yellow (80) + humidity green (100); the rest have no data
        assert_eq!(report.score_overall, 90.0);
        assert_eq!(report.score_band, ScoreBand::Eccellente);
        assert_eq!(report.areas_of_excellence, vec!["Umidità relativa media"]);
        assert_eq!(report.areas_of_improvement, vec!["Temperatura media ambiente"]);
    }

    #[test]
    fn recommendations_prefer_worst_status_then_pad() {
        let targets = KpiTargets::default();
        let report = KpiAggregator::aggregate(
            &env_window(&[22.0]),
            &targets.environment,
            ENV_REPORT_KPIS,
            &ReportOptions::new(1, 5),
        );
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.recommendations[0], catalog::suggestion("temperature").unwrap());
        assert_eq!(report.recommendations[1], catalog::generic_fillers()[0]);
    }

    fn row(key: &str, status: KpiStatus) -> KpiRow {
        KpiRow {
            key: key.to_string(),
            label: catalog::label(key).to_string(),
            current: Some(1.0),
            unit: String::new(),
            display: String::new(),
            target: String::new(),
            status,
            trend: Trend::Flat,
        }
    }

    #[test]
    fn reds_come_before_yellows() {
        let rows = vec![
            row("turnover_pct", KpiStatus::Yellow),
            row("absenteeism_pct", KpiStatus::Red),
            row("satisfaction_index", KpiStatus::Green),
            row("gender_female_pct", KpiStatus::Yellow),
            row("accidents_per_1000h", KpiStatus::Red),
        ];
        let recs = recommendations(&rows);
        let expected: Vec<Recommendation> = ["absenteeism_pct", "accidents_per_1000h", "turnover_pct", "gender_female_pct"]
            .iter()
            .map(|k| catalog::suggestion(k).unwrap())
            .collect();
        // gender ties with the third pick (both yellow) and is kept
        assert_eq!(recs, expected);
    }

    #[test]
    fn exactly_three_when_no_tie_at_cutoff() {
        let rows = vec![
            row("turnover_pct", KpiStatus::Red),
            row("absenteeism_pct", KpiStatus::Red),
            row("gender_female_pct", KpiStatus::Yellow),
            row("accidents_per_1000h", KpiStatus::Green),
        ];
        assert_eq!(recommendations(&rows).len(), 3);
    }

    #[test]
    fn satisfaction_is_rescaled_before_classification() {
        let targets = KpiTargets::default();
        let mut record = SocialRecord::new("Plant A", "2025-01-01", "2025-03-31");
        record.satisfaction_index = Some(8.0);
        record.satisfaction_scale = 10.0;
        let window = WindowSelector::select_social(&[record], &WindowSelection::default());

        let report = KpiAggregator::aggregate(
            &window,
            &targets.social,
            SOCIAL_KPIS,
            &ReportOptions::new(1, 3),
        );
        let sat = report.row("satisfaction_index").unwrap();
        assert_eq!(sat.current, Some(80.0));
        assert_eq!(sat.status, KpiStatus::Green);
        assert_eq!(sat.unit, "/100");
        assert_eq!(report.facility.as_deref(), Some("Plant A"));
        assert_eq!(report.period.start.as_deref(), Some("2025-01-01"));
        assert_eq!(report.period.end.as_deref(), Some("2025-03-31"));
    }

    #[test]
    fn source_field_override_reads_renamed_column() {
        let targets = KpiTargets::default();
        let records = vec![EnvironmentRecord::new("2025-09-15T10:00:00").with_field("co2_calibrated", 650.0)];
        let window = WindowSelector::select(&records, &WindowSelection::default());
        let options = ReportOptions::new(1, 5).with_source_field("co2_ppm", "co2_calibrated");

        let report = KpiAggregator::aggregate(&window, &targets.environment, &["co2_ppm"], &options);
        let co2 = report.row("co2_ppm").unwrap();
        assert_eq!(co2.current, Some(650.0));
        assert_eq!(co2.status, KpiStatus::Green);
    }

    #[test]
    fn report_serializes_kpis_as_ordered_map() {
        let targets = KpiTargets::default();
        let report = KpiAggregator::aggregate(
            &env_window(&[25.0]),
            &targets.environment,
            ENV_REPORT_KPIS,
            &ReportOptions::new(1, 5),
        );
        let json = serde_json::to_string(&report).unwrap();
        let temp_at = json.find("\"temperature\"").unwrap();
        let co2eq_at = json.find("\"co2eq_ratio\"").unwrap();
        assert!(temp_at < co2eq_at);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kpis"]["temperature"]["status"], "green");
        assert_eq!(value["kpis"]["energy_specific"]["display"], "N/D");
        assert_eq!(value["kpis"]["energy_specific"]["trend"], "—");
        assert_eq!(value["score_band"], "Eccellente");
        assert!(value["recommendations"][0]["azione"].is_string());

        let report_value = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = report_value["kpis"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ENV_REPORT_KPIS);
    }

    #[test]
    fn snapshot_uses_latest_value_and_endpoint_slope() {
        let targets = KpiTargets::default();
        let records: Vec<EnvironmentRecord> = [20.0, 24.0, 28.0, 31.0]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                EnvironmentRecord::new(format!("2025-09-15T10:0{}:00", i))
                    .with_field("temperature", *t)
                    .with_field("acceleration", 9.806)
                    .with_field("air_quality_raw", 256.0)
            })
            .collect();
        let options = ReportOptions::new(1, 3).with_uncalibrated("co2_ppm", "air_quality_raw", "idx_raw");

        let snapshot = KpiAggregator::snapshot(
            &records,
            &targets.environment,
            &["temperature", "vibration_g", "co2_ppm"],
            3,
            &options,
        );

        assert_eq!(snapshot.window.used_last_n, 3);
        assert_eq!(snapshot.window.from.as_deref(), Some("2025-09-15T10:01:00"));
        let temp = snapshot.row("temperature").unwrap();
        assert_eq!(temp.current, Some(31.0));
        assert_eq!(temp.status, KpiStatus::Yellow);
        assert_eq!(temp.trend, Trend::Up);

        let vib = snapshot.row("vibration_g").unwrap();
        assert_eq!(vib.current, Some(1.0));
        assert_eq!(vib.status, KpiStatus::Green);

        let co2 = snapshot.row("co2_ppm").unwrap();
        assert_eq!(co2.current, Some(256.0));
        assert_eq!(co2.unit, "idx_raw");
        assert_eq!(co2.status, KpiStatus::NotAvailable);

        // yellow 80 + green 100
        assert_eq!(snapshot.score, Some(90.0));
        assert_eq!(snapshot.score_band, Some(ScoreBand::Eccellente));
        assert!(snapshot.missing_fields.is_empty());
    }

    #[test]
    fn empty_snapshot_has_no_score() {
        let targets = KpiTargets::default();
        let records: Vec<SocialRecord> = Vec::new();
        let snapshot = KpiAggregator::snapshot(
            &records,
            &targets.social,
            SOCIAL_KPIS,
            3,
            &ReportOptions::new(1, 3),
        );
        assert_eq!(snapshot.score, None);
        assert_eq!(snapshot.score_band, None);
        assert_eq!(snapshot.missing_fields.len(), SOCIAL_KPIS.len());
        assert_eq!(snapshot.window.used_last_n, 0);
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::from_score(90.0), ScoreBand::Eccellente);
        assert_eq!(ScoreBand::from_score(89.9), ScoreBand::Buono);
        assert_eq!(ScoreBand::from_score(70.0), ScoreBand::Buono);
        assert_eq!(ScoreBand::from_score(69.9), ScoreBand::Critico);
        assert_eq!(ScoreBand::Critico.to_string(), "Critico");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }
}
