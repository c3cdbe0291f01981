//! JSON-file Target Store Adapter
//!
//! Reads the KPI targets document. A missing file is bootstrapped with the
//! default targets; a corrupt one is reported and left untouched.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::kpi::KpiTargets;
use crate::ports::{TargetStore, TargetStoreError};

/// File-backed KPI targets
#[derive(Debug, Clone)]
pub struct JsonTargetStore {
    path: PathBuf,
}

impl JsonTargetStore {
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

    /// Writes the default targets and returns them.
    async fn bootstrap(&self) -> Result<KpiTargets, TargetStoreError> {
        let path = self.display_path();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TargetStoreError::io(&path, e))?;
        }

        let targets = KpiTargets::default();
        let json = serde_json::to_string_pretty(&targets)
            .map_err(|e| TargetStoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| TargetStoreError::io(&path, e))?;

        tracing::info!(path = %path, "Created KPI targets file with defaults");
        Ok(targets)
    }
}

#[async_trait]
impl TargetStore for JsonTargetStore {
    async fn load(&self) -> Result<KpiTargets, TargetStoreError> {
        let path = self.display_path();
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return self.bootstrap().await;
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| TargetStoreError::io(&path, e))?;
        let targets: KpiTargets =
            serde_json::from_str(&raw).map_err(|e| TargetStoreError::corrupt(&path, e))?;
        targets.validate()?;

        tracing::debug!(
            path = %path,
            environment = targets.environment.metrics.len(),
            social = targets.social.metrics.len(),
            "Loaded KPI targets"
        );
        Ok(targets)
    }

    fn source(&self) -> String {
        self.display_path()
    }
}
