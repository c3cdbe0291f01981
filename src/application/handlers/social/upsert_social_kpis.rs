//! UpsertSocialKpisHandler - command handler storing one social KPI record.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::report_settings::to_json;
use crate::domain::foundation::{DomainError, Timestamp, ValidationError};
use crate::domain::kpi::SocialRecord;
use crate::ports::SocialDataset;

/// Accepted satisfaction index scales.
pub const SATISFACTION_SCALES: [f64; 2] = [10.0, 100.0];

#[derive(Debug, Serialize)]
struct UpsertResult {
    stored: bool,
    path: String,
    count: usize,
    replaced: bool,
    last: SocialRecord,
}

pub struct UpsertSocialKpisHandler {
    dataset: Arc<dyn SocialDataset>,
}

impl UpsertSocialKpisHandler {
    pub fn new(dataset: Arc<dyn SocialDataset>) -> Self {
        Self { dataset }
    }

    pub async fn handle(&self, mut record: SocialRecord) -> Result<Value, DomainError> {
        validate(&record)?;
        record.saved_at = Some(Timestamp::now().to_rfc3339_z());

        let outcome = self.dataset.upsert(record.clone()).await?;
        tracing::info!(
            facility = %record.facility,
            period_start = %record.period_start,
            replaced = outcome.replaced,
            "Social KPIs stored"
        );

        to_json(&UpsertResult {
            stored: true,
            path: self.dataset.source(),
            count: outcome.count,
            replaced: outcome.replaced,
            last: record,
        })
    }
}

fn validate(record: &SocialRecord) -> Result<(), ValidationError> {
    let required = [
        ("facility", &record.facility),
        ("period_start", &record.period_start),
        ("period_end", &record.period_end),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
    }
    if !SATISFACTION_SCALES.contains(&record.satisfaction_scale) {
        return Err(ValidationError::invalid_format(
            "satisfaction_scale",
            format!("must be 10 or 100, got {}", record.satisfaction_scale),
        ));
    }
    Ok(())
}
