//! EnvKpiSnapshotHandler - live environmental KPIs from the latest sample.

use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::report_settings::{to_json, window_n_or, ReportSettings};
use crate::domain::foundation::DomainError;
use crate::domain::kpi::catalog::ENV_SNAPSHOT_KPIS;
use crate::domain::kpi::KpiAggregator;
use crate::domain::tools::EnvSnapshotArgs;
use crate::ports::{EnvironmentDataset, TargetStore};

pub struct EnvKpiSnapshotHandler {
    dataset: Arc<dyn EnvironmentDataset>,
    targets: Arc<dyn TargetStore>,
    settings: Arc<ReportSettings>,
}

impl EnvKpiSnapshotHandler {
    pub fn new(
        dataset: Arc<dyn EnvironmentDataset>,
        targets: Arc<dyn TargetStore>,
        settings: Arc<ReportSettings>,
    ) -> Self {
        Self {
            dataset,
            targets,
            settings,
        }
    }

    pub async fn handle(&self, args: EnvSnapshotArgs) -> Result<Value, DomainError> {
        let decimals = ReportSettings::decimals_or(args.decimals, self.settings.decimals)?;
        let targets = self.targets.load().await?;
        let window_n = window_n_or(args.window_n, targets.env_window_n())?;
        let records = self.dataset.load().await?;

        let options =
            self.settings
                .environment_options(decimals, window_n, None, args.co2_field.as_deref());
        let snapshot = KpiAggregator::snapshot(
            &records,
            &targets.environment,
            ENV_SNAPSHOT_KPIS,
            window_n,
            &options,
        );

        tracing::debug!(
            used_last_n = snapshot.window.used_last_n,
            score = ?snapshot.score,
            "Environmental snapshot computed"
        );
        to_json(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEnvironmentDataset, InMemoryTargetStore};
    use crate::domain::kpi::EnvironmentRecord;

    fn handler(records: Vec<EnvironmentRecord>) -> EnvKpiSnapshotHandler {
        EnvKpiSnapshotHandler::new(
            Arc::new(InMemoryEnvironmentDataset::with_records(records)),
            Arc::new(InMemoryTargetStore::new()),
            Arc::new(ReportSettings::default()),
        )
    }

    #[tokio::test]
    async fn latest_sample_drives_current_values() {
        let records = vec![
            EnvironmentRecord::new("2025-09-15T10:00:00")
                .with_field("temperature", 22.0)
                .with_field("acceleration", 9.806),
            EnvironmentRecord::new("2025-09-15T10:05:00")
                .with_field("temperature", 26.0)
                .with_field("distance_mm", 121.0)
                .with_field("acceleration", 4.903),
        ];
        let output = handler(records).handle(EnvSnapshotArgs::default()).await.unwrap();

        assert_eq!(output["kpis"]["temperature"]["current"], 26.0);
        assert_eq!(output["kpis"]["temperature"]["trend"], "↗");
        assert_eq!(output["kpis"]["distance_mm"]["status"], "green");
        assert_eq!(output["kpis"]["vibration_g"]["current"], 0.5);
        assert_eq!(output["window"]["used_last_n"], 2);
        assert!(output["targets_used"]["temperature"].is_object());
    }

    #[tokio::test]
    async fn empty_dataset_has_no_score() {
        let output = handler(Vec::new()).handle(EnvSnapshotArgs::default()).await.unwrap();
        assert!(output["score"].is_null());
        assert_eq!(output["missing_fields"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn window_n_limits_the_trend_window() {
        let records: Vec<EnvironmentRecord> = (0..10)
            .map(|i| EnvironmentRecord::new(format!("2025-09-15T10:{:02}:00", i)).with_field("light", 90.0))
            .collect();
        let args = EnvSnapshotArgs {
            window_n: Some(3),
            ..EnvSnapshotArgs::default()
        };
        let output = handler(records).handle(args).await.unwrap();
        assert_eq!(output["window"]["used_last_n"], 3);
        assert_eq!(output["window"]["from"], "2025-09-15T10:07:00");
    }
}
