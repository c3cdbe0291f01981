//! In-Memory Dataset Adapters
//!
//! Hold environmental samples and social records in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::kpi::{EnvironmentRecord, SocialRecord};
use crate::ports::{DatasetError, EnvironmentDataset, SocialDataset, UpsertOutcome};

/// In-memory sensor dataset
#[derive(Debug, Clone)]
pub struct InMemoryEnvironmentDataset {
    records: Arc<RwLock<Vec<EnvironmentRecord>>>,
}

impl InMemoryEnvironmentDataset {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<EnvironmentRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Append a sample (useful for tests)
    pub async fn push(&self, record: EnvironmentRecord) {
        self.records.write().await.push(record);
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for InMemoryEnvironmentDataset {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnvironmentDataset for InMemoryEnvironmentDataset {
    async fn load(&self) -> Result<Vec<EnvironmentRecord>, DatasetError> {
        Ok(self.records.read().await.clone())
    }

    fn source(&self) -> String {
        "memory:environment".to_string()
    }
}

/// In-memory social KPI store
#[derive(Debug, Clone)]
pub struct InMemorySocialDataset {
    records: Arc<RwLock<Vec<SocialRecord>>>,
}

impl InMemorySocialDataset {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<SocialRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for InMemorySocialDataset {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialDataset for InMemorySocialDataset {
    async fn load(&self) -> Result<Vec<SocialRecord>, DatasetError> {
        Ok(self.records.read().await.clone())
    }

    async fn upsert(&self, record: SocialRecord) -> Result<UpsertOutcome, DatasetError> {
        let mut records = self.records.write().await;
        let replaced = SocialRecord::upsert_into(&mut records, record);
        Ok(UpsertOutcome {
            count: records.len(),
            replaced,
        })
    }

    fn source(&self) -> String {
        "memory:social".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn environment_load_returns_pushed_samples() {
        let dataset = InMemoryEnvironmentDataset::new();
        dataset
            .push(EnvironmentRecord::new("2025-09-15T10:00:00").with_field("light", 90.0))
            .await;

        assert_eq!(dataset.count().await, 1);
        assert_eq!(dataset.load().await.unwrap()[0].field("light"), Some(90.0));
    }

    #[tokio::test]
    async fn social_upsert_replaces_and_counts() {
        let dataset = InMemorySocialDataset::new();
        let first = dataset
            .upsert(SocialRecord::new("A", "2025-01-01", "2025-03-31"))
            .await
            .unwrap();
        let second = dataset
            .upsert(SocialRecord::new("A", "2025-01-01", "2025-03-31"))
            .await
            .unwrap();

        assert!(!first.replaced);
        assert!(second.replaced);
        assert_eq!(second.count, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let dataset = InMemorySocialDataset::new();
        let clone = dataset.clone();
        clone
            .upsert(SocialRecord::new("A", "2025-01-01", "2025-03-31"))
            .await
            .unwrap();

        assert_eq!(dataset.count().await, 1);
        dataset.clear().await;
        assert_eq!(clone.count().await, 0);
    }
}
