//! Target Store Port - Interface for loading KPI target definitions.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::kpi::KpiTargets;

/// Errors that can occur while loading targets.
#[derive(Debug, Clone, Error)]
pub enum TargetStoreError {
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored targets are not valid JSON. Never repaired automatically.
    #[error("Targets file {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Invalid targets: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to serialize targets: {0}")]
    Serialization(String),
}

impl TargetStoreError {
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

impl From<TargetStoreError> for DomainError {
    fn from(err: TargetStoreError) -> Self {
        let code = match &err {
            TargetStoreError::Io { .. } => ErrorCode::StorageError,
            TargetStoreError::Corrupt { .. } => ErrorCode::TargetsCorrupt,
            TargetStoreError::Invalid(_) => ErrorCode::ConfigurationError,
            TargetStoreError::Serialization(_) => ErrorCode::InternalError,
        };
        let domain = DomainError::new(code, err.to_string());
        match err {
            TargetStoreError::Io { path, .. } | TargetStoreError::Corrupt { path, .. } => {
                domain.with_detail("path", path)
            }
            _ => domain,
        }
    }
}

/// Port for the KPI targets document.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Load and validate the targets.
    ///
    /// When nothing is stored yet, the default targets are persisted and
    /// returned.
    ///
    /// # Errors
    /// - `Corrupt` if the stored document cannot be parsed
    /// - `Invalid` if a range has `min > max`
    async fn load(&self) -> Result<KpiTargets, TargetStoreError>;

    fn source(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_targets_are_a_configuration_problem() {
        let err: DomainError = TargetStoreError::corrupt("kpi_targets.json", "EOF").into();
        assert_eq!(err.code, ErrorCode::TargetsCorrupt);
        assert!(err.is_configuration());
    }

    #[test]
    fn invalid_targets_map_to_configuration_error() {
        let invalid: TargetStoreError =
            ValidationError::invalid_format("environment.humidity.green", "min > max").into();
        let err: DomainError = invalid.into();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
        assert!(err.message.contains("humidity"));
    }
}
