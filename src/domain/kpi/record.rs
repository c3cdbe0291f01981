//! Environmental and social dataset records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard gravity used to convert m/s² readings to g.
pub const GRAVITY: f64 = 9.806;

/// Readings above this are assumed to be m/s² rather than g.
const ACCELERATION_G_CEILING: f64 = 3.0;

/// Access to a record's time key for windowing and ordering.
pub trait TimeKeyed {
    /// The key records are ordered and date-filtered by.
    fn time_key(&self) -> &str;

    /// The key closing the period the record covers.
    fn period_end_key(&self) -> &str {
        self.time_key()
    }
}

/// Numeric KPI lookup on a record.
pub trait KpiSource {
    /// Raw value of a KPI field, if present and numeric.
    fn kpi_value(&self, key: &str) -> Option<f64>;

    /// Scale the raw value is expressed on, for KPIs that carry one.
    fn value_scale(&self, _key: &str) -> Option<f64> {
        None
    }

    /// Facility the record belongs to, for sources that track one.
    fn facility(&self) -> Option<&str> {
        None
    }
}

/// One sensor sample. Unknown fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub timestamp: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EnvironmentRecord {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            fields: Map::new(),
        }
    }

    /// Builder used by tests and adapters.
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), Value::from(value));
        self
    }

    /// Numeric field lookup without derivation.
    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Vibration in g, derived from `acceleration` when not recorded directly.
    pub fn vibration_g(&self) -> Option<f64> {
        if let Some(v) = self.field("vibration_g") {
            return Some(v);
        }
        self.field("acceleration").map(|acc| {
            if acc > ACCELERATION_G_CEILING {
                acc / GRAVITY
            } else {
                acc
            }
        })
    }

    /// Copy keeping only the listed fields; `timestamp` is always kept.
    pub fn project(&self, keep: &[String]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(k, _)| keep.iter().any(|f| f == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            timestamp: self.timestamp.clone(),
            fields,
        }
    }
}

impl TimeKeyed for EnvironmentRecord {
    fn time_key(&self) -> &str {
        &self.timestamp
    }
}

impl KpiSource for EnvironmentRecord {
    fn kpi_value(&self, key: &str) -> Option<f64> {
        match key {
            "vibration_g" => self.vibration_g(),
            other => self.field(other),
        }
    }
}

fn default_satisfaction_scale() -> f64 {
    100.0
}

/// Periodic social KPI record for one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRecord {
    pub facility: String,
    pub period_start: String,
    pub period_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_hours_per_employee_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_index: Option<f64>,
    #[serde(default = "default_satisfaction_scale")]
    pub satisfaction_scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absenteeism_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_female_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accidents_per_1000h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_vs_benchmark_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethical_suppliers_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_hours_per_employee_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_projects_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SocialRecord {
    /// Empty record for a facility and period; every KPI unset.
    pub fn new(
        facility: impl Into<String>,
        period_start: impl Into<String>,
        period_end: impl Into<String>,
    ) -> Self {
        Self {
            facility: facility.into(),
            period_start: period_start.into(),
            period_end: period_end.into(),
            turnover_pct: None,
            training_hours_per_employee_y: None,
            satisfaction_index: None,
            satisfaction_scale: default_satisfaction_scale(),
            absenteeism_pct: None,
            gender_female_pct: None,
            accidents_per_1000h: None,
            salary_vs_benchmark_pct: None,
            ethical_suppliers_pct: None,
            overtime_hours_per_employee_m: None,
            community_projects_count: None,
            saved_at: None,
            extra: Map::new(),
        }
    }

    /// Upsert identity: (facility, period_start, period_end).
    pub fn same_period(&self, other: &SocialRecord) -> bool {
        self.facility == other.facility
            && self.period_start == other.period_start
            && self.period_end == other.period_end
    }

    /// Replaces any record for the same facility and period, then appends.
    /// Returns true when an existing record was replaced.
    pub fn upsert_into(records: &mut Vec<SocialRecord>, record: SocialRecord) -> bool {
        let before = records.len();
        records.retain(|existing| !existing.same_period(&record));
        let replaced = records.len() != before;
        records.push(record);
        replaced
    }
}

impl TimeKeyed for SocialRecord {
    fn time_key(&self) -> &str {
        &self.period_start
    }

    fn period_end_key(&self) -> &str {
        &self.period_end
    }
}

impl KpiSource for SocialRecord {
    fn kpi_value(&self, key: &str) -> Option<f64> {
        let value = match key {
            "turnover_pct" => self.turnover_pct,
            "training_hours_per_employee_y" => self.training_hours_per_employee_y,
            "satisfaction_index" => self.satisfaction_index,
            "absenteeism_pct" => self.absenteeism_pct,
            "gender_female_pct" => self.gender_female_pct,
            "accidents_per_1000h" => self.accidents_per_1000h,
            "salary_vs_benchmark_pct" => self.salary_vs_benchmark_pct,
            "ethical_suppliers_pct" => self.ethical_suppliers_pct,
            "overtime_hours_per_employee_m" => self.overtime_hours_per_employee_m,
            "community_projects_count" => self.community_projects_count,
            other => self.extra.get(other).and_then(Value::as_f64),
        };
        value.filter(|v| v.is_finite())
    }

    fn value_scale(&self, key: &str) -> Option<f64> {
        (key == "satisfaction_index").then_some(self.satisfaction_scale)
    }

    fn facility(&self) -> Option<&str> {
        Some(&self.facility)
    }
}
