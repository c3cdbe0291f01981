//! Timestamp value object and lenient time-key parsing.
//!
//! Dataset time keys arrive in several shapes: full ISO-8601 with or without
//! `Z`/offset, naive date-times written by sensors, plain `YYYY-MM-DD` period
//! boundaries and `YYYY-MM` month stamps. All of them normalize to UTC here.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Which side of a date range a bound closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Start,
    End,
}

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// RFC 3339 rendering with a `Z` suffix and second precision.
    pub fn to_rfc3339_z(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Parses any accepted time-key shape, taking the earliest instant it denotes.
    ///
    /// Returns `None` for unparseable input; callers skip such records.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        Self::parse_bound(raw, BoundSide::Start)
    }

    /// Parses a range bound.
    ///
    /// Date-only and month-only inputs cover a whole day or month, so an
    /// `End` bound resolves to the last instant of that period.
    pub fn parse_bound(raw: &str, side: BoundSide) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        let naive_part = s.strip_suffix('Z').unwrap_or(s);
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, format) {
                return Some(Self(naive.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(match side {
                BoundSide::Start => Self::start_of(date),
                BoundSide::End => Self::start_of(date.succ_opt()?).minus_nanos(1),
            });
        }

        let first_of_month = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok()?;
        Some(match side {
            BoundSide::Start => Self::start_of(first_of_month),
            BoundSide::End => {
                let next_month = first_of_month.checked_add_months(chrono::Months::new(1))?;
                Self::start_of(next_month).minus_nanos(1)
            }
        })
    }

    fn start_of(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    fn minus_nanos(&self, nanos: i64) -> Self {
        Self(self.0 - Duration::nanoseconds(nanos))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_z() {
        let ts = Timestamp::parse_lenient("2025-09-15T23:34:10Z").unwrap();
        assert_eq!(ts.as_datetime().hour(), 23);
        assert_eq!(ts.as_datetime().second(), 10);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = Timestamp::parse_lenient("2025-09-15T23:34:10+02:00").unwrap();
        assert_eq!(ts.as_datetime().hour(), 21);
    }

    #[test]
    fn parses_naive_sensor_timestamp_with_fraction() {
        let ts = Timestamp::parse_lenient("2025-09-15T23:34:10.489804").unwrap();
        assert_eq!(ts.as_datetime().minute(), 34);
        assert_eq!(ts.as_datetime().nanosecond(), 489_804_000);
    }

    #[test]
    fn parses_naive_timestamp_without_seconds_and_with_z() {
        let ts = Timestamp::parse_lenient("2025-09-15T08:30Z").unwrap();
        assert_eq!(ts.as_datetime().hour(), 8);
        assert_eq!(ts.as_datetime().minute(), 30);
    }

    #[test]
    fn date_only_start_and_end_cover_the_day() {
        let start = Timestamp::parse_bound("2025-03-31", BoundSide::Start).unwrap();
        let end = Timestamp::parse_bound("2025-03-31", BoundSide::End).unwrap();

        assert_eq!(start.as_datetime().hour(), 0);
        assert_eq!(end.as_datetime().day(), 31);
        assert_eq!(end.as_datetime().hour(), 23);
        assert_eq!(end.as_datetime().second(), 59);
    }

    #[test]
    fn month_only_end_bound_is_last_instant_of_month() {
        let end = Timestamp::parse_bound("2024-02", BoundSide::End).unwrap();
        assert_eq!(end.as_datetime().month(), 2);
        assert_eq!(end.as_datetime().day(), 29);

        let start = Timestamp::parse_bound("2024-02", BoundSide::Start).unwrap();
        assert_eq!(start.as_datetime().day(), 1);
    }

    #[test]
    fn december_month_bound_rolls_into_next_year() {
        let end = Timestamp::parse_bound("2024-12", BoundSide::End).unwrap();
        assert_eq!(end.as_datetime().year(), 2024);
        assert_eq!(end.as_datetime().day(), 31);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Timestamp::parse_lenient("yesterday").is_none());
        assert!(Timestamp::parse_lenient("").is_none());
        assert!(Timestamp::parse_lenient("2025-13").is_none());
    }

    #[test]
    fn rfc3339_z_rendering() {
        let ts = Timestamp::parse_lenient("2025-01-10T09:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339_z(), "2025-01-10T09:00:00Z");
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = Timestamp::parse_lenient("2024-01-15T10:30:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::parse_lenient("2025-01-01").unwrap();
        let b = Timestamp::parse_lenient("2025-01-01T00:00:01Z").unwrap();
        assert!(a < b);
    }
}
