//! Data Window Selector.
//!
//! Records are ordered ascending by their time key, then viewed newest first:
//! index 0 is always the most recent record. Out-of-range requests never fail,
//! they return whatever intersects the data.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BoundSide, Timestamp, ValidationError};

use super::record::{SocialRecord, TimeKeyed};

/// How a window is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectBy {
    #[default]
    Index,
    Date,
}

/// Caller's window request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSelection {
    #[serde(default)]
    pub by: SelectBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx_end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
}

impl WindowSelection {
    pub fn by_index(idx_start: usize, idx_end: usize) -> Self {
        Self {
            by: SelectBy::Index,
            idx_start: Some(idx_start),
            idx_end: Some(idx_end),
            ..Self::default()
        }
    }

    pub fn by_date(date_start: Option<&str>, date_end: Option<&str>) -> Self {
        Self {
            by: SelectBy::Date,
            date_start: date_start.map(str::to_string),
            date_end: date_end.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    /// Fills absent index bounds, leaving explicit ones alone.
    pub fn with_index_defaults(mut self, idx_start: usize, idx_end: usize) -> Self {
        if self.by == SelectBy::Index {
            self.idx_start.get_or_insert(idx_start);
            self.idx_end.get_or_insert(idx_end);
        }
        self
    }

    /// Rejects date bounds that cannot be parsed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bounds = [("date_start", &self.date_start), ("date_end", &self.date_end)];
        for (field, bound) in bounds {
            if let Some(raw) = bound {
                if Timestamp::parse_lenient(raw).is_none() {
                    return Err(ValidationError::invalid_format(
                        field,
                        format!("'{}' is not an ISO-8601 date, YYYY-MM-DD or YYYY-MM", raw),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Selected records, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedWindow<R> {
    records: Vec<R>,
}

impl<R: TimeKeyed> SelectedWindow<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Newest first.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Oldest first.
    pub fn chronological(&self) -> impl Iterator<Item = &R> {
        self.records.iter().rev()
    }

    pub fn newest(&self) -> Option<&R> {
        self.records.first()
    }

    pub fn oldest(&self) -> Option<&R> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (start, end) keys of the window: oldest time key, newest period end.
    pub fn bounds(&self) -> (Option<String>, Option<String>) {
        (
            self.oldest().map(|r| r.time_key().to_string()),
            self.newest().map(|r| r.period_end_key().to_string()),
        )
    }
}

pub struct WindowSelector;

impl WindowSelector {
    /// Sorts ascending by time key. Unparseable keys sort first, by raw text.
    pub fn sort_ascending<R: TimeKeyed>(records: &mut [R]) {
        records.sort_by(|a, b| {
            let ka = (Timestamp::parse_lenient(a.time_key()), a.time_key());
            let kb = (Timestamp::parse_lenient(b.time_key()), b.time_key());
            ka.cmp(&kb)
        });
    }

    /// Selects a window, newest first.
    pub fn select<R: TimeKeyed + Clone>(records: &[R], selection: &WindowSelection) -> SelectedWindow<R> {
        let mut ascending = records.to_vec();
        Self::sort_ascending(&mut ascending);
        let descending: Vec<R> = ascending.into_iter().rev().collect();

        let selected = match selection.by {
            SelectBy::Index => Self::select_by_index(descending, selection),
            SelectBy::Date => Self::select_by_date(descending, selection),
        };
        SelectedWindow::new(selected)
    }

    /// Social variant: exact facility match before windowing.
    pub fn select_social(records: &[SocialRecord], selection: &WindowSelection) -> SelectedWindow<SocialRecord> {
        match selection.facility.as_deref() {
            Some(facility) => {
                let scoped: Vec<SocialRecord> = records
                    .iter()
                    .filter(|r| r.facility == facility)
                    .cloned()
                    .collect();
                Self::select(&scoped, selection)
            }
            None => Self::select(records, selection),
        }
    }

    fn select_by_index<R>(descending: Vec<R>, selection: &WindowSelection) -> Vec<R> {
        if descending.is_empty() {
            return descending;
        }
        let last = descending.len() - 1;
        let i0 = selection.idx_start.unwrap_or(0).min(last);
        let i1 = selection.idx_end.unwrap_or(last).min(last);
        let (from, to) = (i0.min(i1), i0.max(i1));
        descending.into_iter().skip(from).take(to - from + 1).collect()
    }

    fn select_by_date<R: TimeKeyed>(descending: Vec<R>, selection: &WindowSelection) -> Vec<R> {
        let start = selection
            .date_start
            .as_deref()
            .and_then(|raw| Timestamp::parse_bound(raw, BoundSide::Start));
        let end = selection
            .date_end
            .as_deref()
            .and_then(|raw| Timestamp::parse_bound(raw, BoundSide::End));

        descending
            .into_iter()
            .filter(|record| {
                let Some(ts) = Timestamp::parse_lenient(record.time_key()) else {
                    return false;
                };
                start.map_or(true, |s| ts >= s) && end.map_or(true, |e| ts <= e)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::record::EnvironmentRecord;

    fn dataset() -> Vec<EnvironmentRecord> {
        // deliberately unsorted
        vec![
            EnvironmentRecord::new("2025-09-15T10:00:00").with_field("temperature", 22.0),
            EnvironmentRecord::new("2025-09-15T08:00:00").with_field("temperature", 20.0),
            EnvironmentRecord::new("2025-09-16T09:00:00Z").with_field("temperature", 26.0),
            EnvironmentRecord::new("2025-09-15T12:00:00").with_field("temperature", 24.0),
        ]
    }

    fn stamps(window: &SelectedWindow<EnvironmentRecord>) -> Vec<&str> {
        window.records().iter().map(|r| r.timestamp.as_str()).collect()
    }

    #[test]
    fn index_zero_is_most_recent() {
        let window = WindowSelector::select(&dataset(), &WindowSelection::by_index(0, 0));
        assert_eq!(stamps(&window), vec!["2025-09-16T09:00:00Z"]);
    }

    #[test]
    fn index_bounds_order_does_not_matter() {
        let a = WindowSelector::select(&dataset(), &WindowSelection::by_index(1, 2));
        let b = WindowSelector::select(&dataset(), &WindowSelection::by_index(2, 1));
        assert_eq!(a, b);
        assert_eq!(stamps(&a), vec!["2025-09-15T12:00:00", "2025-09-15T10:00:00"]);
    }

    #[test]
    fn index_out_of_range_is_clamped() {
        let window = WindowSelector::select(&dataset(), &WindowSelection::by_index(2, 500));
        assert_eq!(window.len(), 2);
        assert_eq!(window.oldest().unwrap().timestamp, "2025-09-15T08:00:00");

        let beyond = WindowSelector::select(&dataset(), &WindowSelection::by_index(99, 120));
        assert_eq!(stamps(&beyond), vec!["2025-09-15T08:00:00"]);
    }

    #[test]
    fn missing_index_bounds_cover_whole_history() {
        let selection = WindowSelection::default();
        let window = WindowSelector::select(&dataset(), &selection);
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn empty_dataset_gives_empty_window() {
        let records: Vec<EnvironmentRecord> = Vec::new();
        let window = WindowSelector::select(&records, &WindowSelection::by_index(0, 0));
        assert!(window.is_empty());
        assert_eq!(window.bounds(), (None, None));
    }

    #[test]
    fn date_filter_is_inclusive_and_expands_day_end() {
        let selection = WindowSelection::by_date(Some("2025-09-15T10:00:00Z"), Some("2025-09-15"));
        let window = WindowSelector::select(&dataset(), &selection);
        assert_eq!(stamps(&window), vec!["2025-09-15T12:00:00", "2025-09-15T10:00:00"]);
    }

    #[test]
    fn open_date_bounds_are_unbounded() {
        let after = WindowSelector::select(&dataset(), &WindowSelection::by_date(Some("2025-09-16"), None));
        assert_eq!(after.len(), 1);

        let all = WindowSelector::select(&dataset(), &WindowSelection::by_date(None, None));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn month_bounds_select_whole_month() {
        let window = WindowSelector::select(&dataset(), &WindowSelection::by_date(Some("2025-09"), Some("2025-09")));
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn unparseable_records_are_skipped_in_date_mode() {
        let mut records = dataset();
        records.push(EnvironmentRecord::new("garbage"));
        let window = WindowSelector::select(&records, &WindowSelection::by_date(None, None));
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn chronological_iterates_oldest_first() {
        let window = WindowSelector::select(&dataset(), &WindowSelection::by_index(0, 3));
        let first = window.chronological().next().unwrap();
        assert_eq!(first.timestamp, "2025-09-15T08:00:00");
    }

    #[test]
    fn facility_filter_applies_before_windowing() {
        let records = vec![
            SocialRecord::new("A", "2025-01-01", "2025-03-31"),
            SocialRecord::new("B", "2025-04-01", "2025-06-30"),
            SocialRecord::new("A", "2024-10-01", "2024-12-31"),
        ];
        let selection = WindowSelection::by_index(0, 0).with_facility("A");
        let window = WindowSelector::select_social(&records, &selection);
        assert_eq!(window.len(), 1);
        assert_eq!(window.newest().unwrap().period_start, "2025-01-01");
        assert_eq!(
            window.bounds(),
            (Some("2025-01-01".to_string()), Some("2025-03-31".to_string()))
        );
    }

    #[test]
    fn unknown_facility_gives_empty_window() {
        let records = vec![SocialRecord::new("A", "2025-01-01", "2025-03-31")];
        let selection = WindowSelection::default().with_facility("Z");
        assert!(WindowSelector::select_social(&records, &selection).is_empty());
    }

    #[test]
    fn defaults_fill_only_absent_bounds() {
        let selection = WindowSelection {
            idx_end: Some(3),
            ..WindowSelection::default()
        }
        .with_index_defaults(0, 500);
        assert_eq!(selection.idx_start, Some(0));
        assert_eq!(selection.idx_end, Some(3));
    }

    #[test]
    fn invalid_date_bound_fails_validation() {
        let selection = WindowSelection::by_date(Some("last week"), None);
        assert!(matches!(
            selection.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(WindowSelection::by_date(Some("2025-01"), Some("2025-02-28")).validate().is_ok());
    }

    #[test]
    fn selection_deserializes_with_defaults() {
        let selection: WindowSelection = serde_json::from_str(r#"{"by":"date","date_start":"2025-01"}"#).unwrap();
        assert_eq!(selection.by, SelectBy::Date);
        assert_eq!(selection.idx_start, None);
    }
}
