//! SocialKpiSnapshotHandler - social KPIs of the latest period.

use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::report_settings::{to_json, window_n_or, ReportSettings};
use crate::domain::foundation::DomainError;
use crate::domain::kpi::catalog::SOCIAL_KPIS;
use crate::domain::kpi::{KpiAggregator, ReportOptions, SocialRecord};
use crate::domain::tools::SocialSnapshotArgs;
use crate::ports::{SocialDataset, TargetStore};

pub struct SocialKpiSnapshotHandler {
    dataset: Arc<dyn SocialDataset>,
    targets: Arc<dyn TargetStore>,
    settings: Arc<ReportSettings>,
}

impl SocialKpiSnapshotHandler {
    pub fn new(
        dataset: Arc<dyn SocialDataset>,
        targets: Arc<dyn TargetStore>,
        settings: Arc<ReportSettings>,
    ) -> Self {
        Self {
            dataset,
            targets,
            settings,
        }
    }

    pub async fn handle(&self, args: SocialSnapshotArgs) -> Result<Value, DomainError> {
        let decimals = ReportSettings::decimals_or(args.decimals, self.settings.decimals)?;
        let targets = self.targets.load().await?;
        let window_n = window_n_or(args.window_n, targets.social_window_n())?;

        let records: Vec<SocialRecord> = match args.facility.as_deref() {
            Some(facility) => self
                .dataset
                .load()
                .await?
                .into_iter()
                .filter(|r| r.facility == facility)
                .collect(),
            None => self.dataset.load().await?,
        };

        let options = ReportOptions::new(decimals, window_n).with_facility(args.facility);
        let snapshot =
            KpiAggregator::snapshot(&records, &targets.social, SOCIAL_KPIS, window_n, &options);

        tracing::debug!(
            facility = snapshot.facility.as_deref().unwrap_or("N/D"),
            used_last_n = snapshot.window.used_last_n,
            "Social snapshot computed"
        );
        to_json(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySocialDataset, InMemoryTargetStore};

    fn handler() -> SocialKpiSnapshotHandler {
        let periods = [
            ("Plant A", "2025-01-01", "2025-03-31", 14.0),
            ("Plant A", "2025-04-01", "2025-06-30", 9.0),
            ("Plant B", "2025-04-01", "2025-06-30", 3.0),
        ];
        let records = periods
            .iter()
            .map(|(facility, start, end, turnover)| {
                let mut record = SocialRecord::new(*facility, *start, *end);
                record.turnover_pct = Some(*turnover);
                record
            })
            .collect();
        SocialKpiSnapshotHandler::new(
            Arc::new(InMemorySocialDataset::with_records(records)),
            Arc::new(InMemoryTargetStore::new()),
            Arc::new(ReportSettings::default()),
        )
    }

    #[tokio::test]
    async fn facility_snapshot_trends_over_its_periods() {
        let args = SocialSnapshotArgs {
            facility: Some("Plant A".into()),
            ..SocialSnapshotArgs::default()
        };
        let output = handler().handle(args).await.unwrap();

        assert_eq!(output["facility"], "Plant A");
        assert_eq!(output["period"]["start"], "2025-04-01");
        assert_eq!(output["kpis"]["turnover_pct"]["current"], 9.0);
        assert_eq!(output["kpis"]["turnover_pct"]["status"], "green");
        assert_eq!(output["kpis"]["turnover_pct"]["trend"], "↘");
        assert_eq!(output["score"], 100.0);
    }

    #[tokio::test]
    async fn missing_facility_yields_empty_snapshot() {
        let args = SocialSnapshotArgs {
            facility: Some("Plant Z".into()),
            ..SocialSnapshotArgs::default()
        };
        let output = handler().handle(args).await.unwrap();
        assert!(output["score"].is_null());
        assert_eq!(output["window"]["used_last_n"], 0);
    }
}
