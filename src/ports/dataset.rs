//! Dataset Ports - Interfaces for reading sensor samples and social KPI records.
//!
//! The analysis core never touches storage: handlers load a full snapshot
//! through these ports and pass it down as plain vectors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::kpi::{EnvironmentRecord, SocialRecord};

/// Errors that can occur while reading or writing a dataset.
#[derive(Debug, Clone, Error)]
pub enum DatasetError {
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Dataset {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Failed to serialize dataset: {0}")]
    Serialization(String),
}

impl DatasetError {
    pub fn io(path: impl Into<String>, err: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn corrupt(path: impl Into<String>, err: impl ToString) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<DatasetError> for DomainError {
    fn from(err: DatasetError) -> Self {
        let code = match &err {
            DatasetError::Io { .. } => ErrorCode::StorageError,
            DatasetError::Corrupt { .. } => ErrorCode::DatasetCorrupt,
            DatasetError::Serialization(_) => ErrorCode::InternalError,
        };
        let domain = DomainError::new(code, err.to_string());
        match err {
            DatasetError::Io { path, .. } | DatasetError::Corrupt { path, .. } => {
                domain.with_detail("path", path)
            }
            DatasetError::Serialization(_) => domain,
        }
    }
}

/// Result of a social upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Records stored after the write
    pub count: usize,
    /// True when a record for the same facility and period was overwritten
    pub replaced: bool,
}

/// Port for the environmental sensor time series.
#[async_trait]
pub trait EnvironmentDataset: Send + Sync {
    /// Load every sample, in storage order.
    ///
    /// A missing dataset is an empty dataset, not an error.
    ///
    /// # Errors
    /// Returns `DatasetError::Corrupt` if the stored data cannot be parsed
    async fn load(&self) -> Result<Vec<EnvironmentRecord>, DatasetError>;

    /// Human-readable location of the dataset (path or backend name).
    fn source(&self) -> String;
}

/// Port for periodic social KPI records.
#[async_trait]
pub trait SocialDataset: Send + Sync {
    /// Load every stored record, in storage order.
    async fn load(&self) -> Result<Vec<SocialRecord>, DatasetError>;

    /// Insert a record, replacing any record with the same
    /// (facility, period_start, period_end).
    async fn upsert(&self, record: SocialRecord) -> Result<UpsertOutcome, DatasetError>;

    fn source(&self) -> String;
}
