//! ReadEnvDataHandler - raw sensor samples for a window, optionally projected.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::report_settings::to_json;
use crate::domain::foundation::DomainError;
use crate::domain::kpi::{EnvironmentRecord, WindowSelector};
use crate::domain::tools::request::ENV_READ_WINDOW;
use crate::domain::tools::ReadEnvDataArgs;
use crate::ports::EnvironmentDataset;

#[derive(Debug, Serialize)]
struct WindowBounds {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum FieldSelection {
    All(&'static str),
    Only(Vec<String>),
}

#[derive(Debug, Serialize)]
struct ReadEnvDataResult {
    source: String,
    count: usize,
    fields: FieldSelection,
    window: WindowBounds,
    /// Most recent first
    records: Vec<EnvironmentRecord>,
}

pub struct ReadEnvDataHandler {
    dataset: Arc<dyn EnvironmentDataset>,
}

impl ReadEnvDataHandler {
    pub fn new(dataset: Arc<dyn EnvironmentDataset>) -> Self {
        Self { dataset }
    }

    pub async fn handle(&self, args: ReadEnvDataArgs) -> Result<Value, DomainError> {
        let (start, end) = ENV_READ_WINDOW;
        let selection = args.window.with_index_defaults(start, end);
        selection.validate()?;

        let records = self.dataset.load().await?;
        let window = WindowSelector::select(&records, &selection);
        let (from, to) = window.bounds();

        let (fields, records) = match args.fields.filter(|f| !f.is_empty()) {
            Some(fields) => {
                let projected = window.records().iter().map(|r| r.project(&fields)).collect();
                (FieldSelection::Only(fields), projected)
            }
            None => (FieldSelection::All("all"), window.into_records()),
        };

        to_json(&ReadEnvDataResult {
            source: self.dataset.source(),
            count: records.len(),
            fields,
            window: WindowBounds { from, to },
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryEnvironmentDataset;
    use crate::domain::kpi::WindowSelection;

    fn handler() -> ReadEnvDataHandler {
        let records = (0..8)
            .map(|i| {
                EnvironmentRecord::new(format!("2025-09-1{}T08:00:00", i))
                    .with_field("temperature", 20.0 + i as f64)
                    .with_field("humidity", 50.0)
            })
            .collect();
        ReadEnvDataHandler::new(Arc::new(InMemoryEnvironmentDataset::with_records(records)))
    }

    #[tokio::test]
    async fn default_window_is_last_five_newest_first() {
        let output = handler().handle(ReadEnvDataArgs::default()).await.unwrap();

        assert_eq!(output["count"], 5);
        assert_eq!(output["fields"], "all");
        assert_eq!(output["source"], "memory:environment");
        assert_eq!(output["records"][0]["timestamp"], "2025-09-17T08:00:00");
        assert_eq!(output["window"]["from"], "2025-09-13T08:00:00");
        assert_eq!(output["window"]["to"], "2025-09-17T08:00:00");
    }

    #[tokio::test]
    async fn projection_keeps_timestamp() {
        let args = ReadEnvDataArgs {
            window: WindowSelection::by_index(0, 0),
            fields: Some(vec!["humidity".to_string()]),
        };
        let output = handler().handle(args).await.unwrap();

        let record = &output["records"][0];
        assert_eq!(record["humidity"], 50.0);
        assert!(record.get("temperature").is_none());
        assert_eq!(record["timestamp"], "2025-09-17T08:00:00");
        assert_eq!(output["fields"][0], "humidity");
    }

    #[tokio::test]
    async fn date_window_selects_inclusive_days() {
        let args = ReadEnvDataArgs {
            window: WindowSelection::by_date(Some("2025-09-12"), Some("2025-09-13")),
            fields: None,
        };
        let output = handler().handle(args).await.unwrap();
        assert_eq!(output["count"], 2);
    }
}
