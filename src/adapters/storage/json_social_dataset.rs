//! JSON-file Social Dataset Adapter
//!
//! Stores social KPI records as a pretty-printed JSON array. Writes are
//! read-modify-write under a process-local lock.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::kpi::SocialRecord;
use crate::ports::{DatasetError, SocialDataset, UpsertOutcome};

/// File-backed social KPI store
#[derive(Debug, Clone)]
pub struct JsonSocialDataset {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonSocialDataset {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Parsed document, or `None` when the file is missing or blank.
    async fn read_document(&self) -> Result<Option<Value>, DatasetError> {
        let path = self.display_path();
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DatasetError::io(&path, e))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DatasetError::corrupt(&path, e))
    }

    async fn read_records(&self) -> Result<Vec<SocialRecord>, DatasetError> {
        let path = self.display_path();
        let entries = match self.read_document().await? {
            None => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                tracing::warn!(path = %path, "Social dataset is not a JSON array, treating as empty");
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let records: Vec<SocialRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() < total {
            tracing::warn!(
                path = %path,
                skipped = total - records.len(),
                "Skipped social records missing facility or period"
            );
        }
        Ok(records)
    }

    /// Raw entries for a rewrite. Entries that do not parse as records are
    /// kept untouched; a document that is not an array cannot be rewritten.
    async fn read_entries(&self) -> Result<Vec<Value>, DatasetError> {
        match self.read_document().await? {
            None => Ok(Vec::new()),
            Some(Value::Array(entries)) => Ok(entries),
            Some(_) => Err(DatasetError::corrupt(
                self.display_path(),
                "social dataset is not a JSON array",
            )),
        }
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<(), DatasetError> {
        let path = self.display_path();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DatasetError::io(&path, e))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| DatasetError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| DatasetError::io(&path, e))
    }
}

#[async_trait]
impl SocialDataset for JsonSocialDataset {
    async fn load(&self) -> Result<Vec<SocialRecord>, DatasetError> {
        let records = self.read_records().await?;
        tracing::debug!(path = %self.display_path(), count = records.len(), "Loaded social dataset");
        Ok(records)
    }

    async fn upsert(&self, record: SocialRecord) -> Result<UpsertOutcome, DatasetError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        let before = entries.len();
        entries.retain(|entry| !same_period(entry, &record));
        let replaced = entries.len() != before;
        entries.push(
            serde_json::to_value(&record).map_err(|e| DatasetError::Serialization(e.to_string()))?,
        );
        self.write_entries(&entries).await?;

        tracing::info!(
            path = %self.display_path(),
            count = entries.len(),
            replaced,
            "Stored social KPI record"
        );
        Ok(UpsertOutcome {
            count: entries.len(),
            replaced,
        })
    }

    fn source(&self) -> String {
        self.display_path()
    }
}

/// Upsert identity on a raw entry: (facility, period_start, period_end).
fn same_period(entry: &Value, record: &SocialRecord) -> bool {
    let key = |name: &str| entry.get(name).and_then(Value::as_str);
    key("facility") == Some(record.facility.as_str())
        && key("period_start") == Some(record.period_start.as_str())
        && key("period_end") == Some(record.period_end.as_str())
}
