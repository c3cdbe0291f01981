//! GenerateDssReportHandler - AHP combination of environmental, social and
//! financial indicators.
//!
//! The environmental side is aggregated over the requested window. The
//! social side follows the same dates when the request selects by date and
//! otherwise uses the latest period of the requested facility.

use std::sync::Arc;

use crate::adapters::MarkdownReportRenderer;
use crate::application::handlers::report_settings::{to_json, ReportOutput, ReportSettings};
use crate::domain::analysis::{DssCombiner, DssOptions, PairwiseMatrix};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::kpi::catalog::{ENV_DSS_KPIS, SOCIAL_KPIS};
use crate::domain::kpi::{KpiAggregator, ReportOptions, SelectBy, WindowSelection, WindowSelector};
use crate::domain::tools::request::{DSS_WINDOW, SOCIAL_REPORT_WINDOW};
use crate::domain::tools::{DssReportArgs, OutputMode};
use crate::ports::{EnvironmentDataset, SocialDataset, TargetStore};

pub struct GenerateDssReportHandler {
    environment: Arc<dyn EnvironmentDataset>,
    social: Arc<dyn SocialDataset>,
    targets: Arc<dyn TargetStore>,
    renderer: MarkdownReportRenderer,
    settings: Arc<ReportSettings>,
}

impl GenerateDssReportHandler {
    pub fn new(
        environment: Arc<dyn EnvironmentDataset>,
        social: Arc<dyn SocialDataset>,
        targets: Arc<dyn TargetStore>,
        settings: Arc<ReportSettings>,
    ) -> Self {
        Self {
            environment,
            social,
            targets,
            renderer: MarkdownReportRenderer::new(),
            settings,
        }
    }

    pub async fn handle(&self, args: DssReportArgs) -> Result<ReportOutput, DomainError> {
        let decimals = ReportSettings::decimals_or(args.decimals, self.settings.dss_decimals)?;
        let status_mapping = match &args.status_mapping {
            Some(requested) => requested.resolve()?,
            None => self.settings.status_mapping,
        };

        let (start, end) = DSS_WINDOW;
        let env_selection = args.window.clone().with_index_defaults(start, end);
        env_selection.validate()?;
        let social_selection = Self::social_selection(&args.window);

        let targets = self.targets.load().await?;
        let env_records = self.environment.load().await?;
        let social_records = self.social.load().await?;

        let env_window = WindowSelector::select(&env_records, &env_selection);
        let env_options = self.settings.environment_options(
            self.settings.decimals,
            targets.env_window_n(),
            None,
            args.co2_field.as_deref(),
        );
        let env_report =
            KpiAggregator::aggregate(&env_window, &targets.environment, ENV_DSS_KPIS, &env_options);

        let social_window = WindowSelector::select_social(&social_records, &social_selection);
        let social_options = ReportOptions::new(self.settings.decimals, targets.social_window_n())
            .with_facility(
                social_selection
                    .facility
                    .clone()
                    .or_else(|| self.settings.plant_name.clone()),
            );
        let social_report =
            KpiAggregator::aggregate(&social_window, &targets.social, SOCIAL_KPIS, &social_options);

        let options = DssOptions {
            category_matrix: matrix_arg("cat_matrix", args.cat_matrix)?,
            env_matrix: matrix_arg("env_matrix", args.env_matrix)?,
            social_matrix: matrix_arg("social_matrix", args.social_matrix)?,
            financial_matrix: matrix_arg("financial_matrix", args.financial_matrix)?,
            financial_values: args.financial_mock_values,
            status_mapping,
            cr_threshold: self.settings.cr_threshold,
            decimals,
        };
        let report = DssCombiner::combine(
            &env_report,
            &social_report,
            &targets.environment,
            &targets.social,
            &options,
        )
        .map_err(combine_error)?;

        for note in &report.notes {
            tracing::warn!(note = %note, "DSS advisory");
        }
        tracing::info!(
            env_records = env_window.len(),
            social_periods = social_window.len(),
            overall = report.scores.overall,
            "DSS report generated"
        );

        match args.output_mode {
            OutputMode::Text => Ok(ReportOutput::Markdown(
                self.renderer.render_dss_report(&report, decimals),
            )),
            OutputMode::Json => Ok(ReportOutput::Structured(to_json(&report)?)),
        }
    }

    fn social_selection(window: &WindowSelection) -> WindowSelection {
        let selection = match window.by {
            SelectBy::Date => {
                WindowSelection::by_date(window.date_start.as_deref(), window.date_end.as_deref())
            }
            SelectBy::Index => {
                let (start, end) = SOCIAL_REPORT_WINDOW;
                WindowSelection::by_index(start, end)
            }
        };
        match &window.facility {
            Some(facility) => selection.with_facility(facility.clone()),
            None => selection,
        }
    }
}

/// A malformed pairwise matrix (empty, non-square or with non-positive
/// entries) is a configuration error naming the argument.
fn matrix_arg(
    field: &'static str,
    rows: Option<Vec<Vec<f64>>>,
) -> Result<Option<PairwiseMatrix>, DomainError> {
    rows.map(PairwiseMatrix::try_new).transpose().map_err(|err| {
        DomainError::configuration(format!("{}: {}", field, err)).with_detail("field", field)
    })
}

/// Matrices of the wrong size for their category are configuration
/// problems; anything else is a bad request value.
fn combine_error(err: ValidationError) -> DomainError {
    match &err {
        ValidationError::DimensionMismatch { field, .. } => {
            let field = field.clone();
            DomainError::configuration(err.to_string()).with_detail("field", field)
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEnvironmentDataset, InMemorySocialDataset, InMemoryTargetStore};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::kpi::{EnvironmentRecord, SocialRecord};
    use std::collections::BTreeMap;

    fn handler() -> GenerateDssReportHandler {
        let env = vec![
            EnvironmentRecord::new("2025-09-15T10:00:00")
                .with_field("temperature", 22.0)
                .with_field("humidity", 50.0),
            EnvironmentRecord::new("2025-09-15T10:01:00")
                .with_field("temperature", 23.0)
                .with_field("humidity", 52.0),
        ];
        let mut q1 = SocialRecord::new("Plant A", "2025-01-01", "2025-03-31");
        q1.turnover_pct = Some(20.0);
        let mut q2 = SocialRecord::new("Plant A", "2025-04-01", "2025-06-30");
        q2.turnover_pct = Some(5.0);

        GenerateDssReportHandler::new(
            Arc::new(InMemoryEnvironmentDataset::with_records(env)),
            Arc::new(InMemorySocialDataset::with_records(vec![q1, q2])),
            Arc::new(InMemoryTargetStore::new()),
            Arc::new(ReportSettings::default()),
        )
    }

    fn json_args() -> DssReportArgs {
        DssReportArgs {
            output_mode: OutputMode::Json,
            ..DssReportArgs::default()
        }
    }

    #[tokio::test]
    async fn json_report_ranks_three_categories() {
        let mut args = json_args();
        args.window = WindowSelection::default().with_facility("Plant A");
        let output = handler().handle(args).await.unwrap().into_value();

        assert_eq!(output["facility"], "Plant A");
        assert_eq!(output["ranking"].as_array().unwrap().len(), 3);
        let overall = output["scores"]["overall"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&overall));
        assert_eq!(output["indicators"]["social"]["turnover_pct"]["status"], "green");
    }

    #[tokio::test]
    async fn plant_name_is_the_facility_without_a_filter() {
        let settings = ReportSettings {
            plant_name: Some("Tessitura Nord".into()),
            ..ReportSettings::default()
        };
        let handler = GenerateDssReportHandler::new(
            Arc::new(InMemoryEnvironmentDataset::new()),
            Arc::new(InMemorySocialDataset::new()),
            Arc::new(InMemoryTargetStore::new()),
            Arc::new(settings),
        );

        let output = handler.handle(json_args()).await.unwrap().into_value();
        assert_eq!(output["facility"], "Tessitura Nord");

        let markdown = handler.handle(DssReportArgs::default()).await.unwrap();
        assert!(markdown.as_markdown().unwrap().contains("**Stabilimento:** Tessitura Nord"));
    }

    #[tokio::test]
    async fn date_selection_applies_to_social_periods() {
        let mut args = json_args();
        args.window = WindowSelection::by_date(Some("2025-01"), Some("2025-02"));
        let output = handler().handle(args).await.unwrap().into_value();

        assert_eq!(output["indicators"]["social"]["turnover_pct"]["status"], "red");
        assert!(output["notes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n.as_str().unwrap().contains("ambientali")));
    }

    #[tokio::test]
    async fn text_mode_renders_markdown() {
        let output = handler().handle(DssReportArgs::default()).await.unwrap();
        let markdown = output.as_markdown().unwrap();
        assert!(markdown.starts_with("# Report DSS (AHP)"));
        assert!(markdown.contains("## Ranking"));
    }

    #[tokio::test]
    async fn wrong_category_matrix_size_is_a_configuration_error() {
        let mut args = json_args();
        args.cat_matrix = Some(vec![vec![1.0, 2.0], vec![0.5, 1.0]]);

        let err = handler().handle(args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
        assert_eq!(err.details.get("field").map(String::as_str), Some("cat_matrix"));
    }

    #[tokio::test]
    async fn non_square_matrix_is_a_configuration_error_too() {
        let mut args = json_args();
        args.env_matrix = Some(vec![vec![1.0, 2.0], vec![0.5]]);

        let err = handler().handle(args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
        assert_eq!(err.details.get("field").map(String::as_str), Some("env_matrix"));
    }

    #[tokio::test]
    async fn financial_override_outside_unit_interval_is_rejected() {
        let mut args = json_args();
        args.financial_mock_values = BTreeMap::from([("sustainable_cost_index".to_string(), 1.5)]);

        let err = handler().handle(args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }
}
