//! In-Memory Target Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::kpi::KpiTargets;
use crate::ports::{TargetStore, TargetStoreError};

/// In-memory KPI targets, starting from the defaults
#[derive(Debug, Clone)]
pub struct InMemoryTargetStore {
    targets: Arc<RwLock<KpiTargets>>,
}

impl InMemoryTargetStore {
    pub fn new() -> Self {
        Self::with_targets(KpiTargets::default())
    }

    pub fn with_targets(targets: KpiTargets) -> Self {
        Self {
            targets: Arc::new(RwLock::new(targets)),
        }
    }

    /// Replace the stored targets (useful for tests)
    pub async fn replace(&self, targets: KpiTargets) {
        *self.targets.write().await = targets;
    }
}

impl Default for InMemoryTargetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TargetStore for InMemoryTargetStore {
    async fn load(&self) -> Result<KpiTargets, TargetStoreError> {
        let targets = self.targets.read().await.clone();
        targets.validate()?;
        Ok(targets)
    }

    fn source(&self) -> String {
        "memory:kpi_targets".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::TargetDefinition;

    #[tokio::test]
    async fn starts_with_default_targets() {
        let store = InMemoryTargetStore::new();
        assert_eq!(store.load().await.unwrap(), KpiTargets::default());
    }

    #[tokio::test]
    async fn replaced_targets_are_validated_on_load() {
        let store = InMemoryTargetStore::new();
        let mut targets = KpiTargets::default();
        targets
            .environment
            .insert("light", TargetDefinition::range([100.0, 80.0], &[]));
        store.replace(targets).await;

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, TargetStoreError::Invalid(_)));
    }
}
