//! JSON-file Environment Dataset Adapter
//!
//! Reads the sensor time series from a JSON array of samples. Samples
//! without a string `timestamp` are skipped.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::kpi::EnvironmentRecord;
use crate::ports::{DatasetError, EnvironmentDataset};

/// File-backed sensor dataset
#[derive(Debug, Clone)]
pub struct JsonEnvironmentDataset {
    path: PathBuf,
}

impl JsonEnvironmentDataset {
    /// # Example
    /// ```ignore
    /// let dataset = JsonEnvironmentDataset::new("./data/sensor_timeseries.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses a dataset document, dropping entries that are not samples.
fn parse_samples(raw: &str, path: &str) -> Result<Vec<EnvironmentRecord>, DatasetError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|e| DatasetError::corrupt(path, e))?;
    let Value::Array(entries) = document else {
        return Err(DatasetError::corrupt(path, "expected a JSON array of samples"));
    };

    let total = entries.len();
    let records: Vec<EnvironmentRecord> = entries
        .into_iter()
        .filter(|entry| entry.get("timestamp").map_or(false, Value::is_string))
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(
            path = %path,
            skipped = total - records.len(),
            "Skipped samples without timestamp"
        );
    }
    Ok(records)
}

#[async_trait]
impl EnvironmentDataset for JsonEnvironmentDataset {
    async fn load(&self) -> Result<Vec<EnvironmentRecord>, DatasetError> {
        let path = self.display_path();
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            tracing::warn!(path = %path, "Environmental dataset not found, treating as empty");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DatasetError::io(&path, e))?;
        let records = parse_samples(&raw, &path)?;

        tracing::debug!(path = %path, count = records.len(), "Loaded environmental dataset");
        Ok(records)
    }

    fn source(&self) -> String {
        self.display_path()
    }
}
