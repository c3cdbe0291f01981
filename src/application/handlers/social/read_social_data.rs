//! ReadSocialDataHandler - stored social records for a facility and window.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::report_settings::to_json;
use crate::domain::foundation::DomainError;
use crate::domain::kpi::{SocialRecord, WindowSelector};
use crate::domain::tools::request::SOCIAL_READ_WINDOW;
use crate::domain::tools::ReadSocialDataArgs;
use crate::ports::SocialDataset;

#[derive(Debug, Serialize)]
struct ReadSocialDataResult {
    source: String,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    facility: Option<String>,
    records: Vec<SocialRecord>,
}

pub struct ReadSocialDataHandler {
    dataset: Arc<dyn SocialDataset>,
}

impl ReadSocialDataHandler {
    pub fn new(dataset: Arc<dyn SocialDataset>) -> Self {
        Self { dataset }
    }

    pub async fn handle(&self, args: ReadSocialDataArgs) -> Result<Value, DomainError> {
        let (start, end) = SOCIAL_READ_WINDOW;
        let selection = args.window.with_index_defaults(start, end);
        selection.validate()?;

        let records = self.dataset.load().await?;
        let window = WindowSelector::select_social(&records, &selection);
        let records = window.into_records();

        to_json(&ReadSocialDataResult {
            source: self.dataset.source(),
            count: records.len(),
            facility: selection.facility,
            records,
        })
    }
}
