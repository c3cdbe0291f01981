//! GenerateEnvironmentReportHandler - windowed environmental KPI report.

use std::sync::Arc;

use crate::adapters::MarkdownReportRenderer;
use crate::application::handlers::report_settings::{to_json, ReportOutput, ReportSettings};
use crate::domain::foundation::DomainError;
use crate::domain::kpi::catalog::{CO2_KPI, ENV_REPORT_KPIS};
use crate::domain::kpi::{KpiAggregator, WindowSelector};
use crate::domain::tools::request::ENV_REPORT_WINDOW;
use crate::domain::tools::{EnvironmentReportArgs, OutputMode};
use crate::ports::{EnvironmentDataset, TargetStore};

pub const ENVIRONMENT_REPORT_TITLE: &str = "Report KPI Ambientali";

/// Handler for the environmental report tool.
pub struct GenerateEnvironmentReportHandler {
    dataset: Arc<dyn EnvironmentDataset>,
    targets: Arc<dyn TargetStore>,
    renderer: MarkdownReportRenderer,
    settings: Arc<ReportSettings>,
}

impl GenerateEnvironmentReportHandler {
    pub fn new(
        dataset: Arc<dyn EnvironmentDataset>,
        targets: Arc<dyn TargetStore>,
        settings: Arc<ReportSettings>,
    ) -> Self {
        Self {
            dataset,
            targets,
            renderer: MarkdownReportRenderer::new(),
            settings,
        }
    }

    pub async fn handle(&self, args: EnvironmentReportArgs) -> Result<ReportOutput, DomainError> {
        let decimals = ReportSettings::decimals_or(args.decimals, self.settings.decimals)?;
        let (start, end) = ENV_REPORT_WINDOW;
        let selection = args.window.with_index_defaults(start, end);
        selection.validate()?;

        let targets = self.targets.load().await?;
        let records = self.dataset.load().await?;
        let window = WindowSelector::select(&records, &selection);

        let options = self.settings.environment_options(
            decimals,
            targets.env_window_n(),
            selection.facility.clone(),
            args.co2_field.as_deref(),
        );
        let kpi_order = self.kpi_order(args.co2_field.as_deref());
        let report = KpiAggregator::aggregate(&window, &targets.environment, &kpi_order, &options);

        tracing::info!(
            records = window.len(),
            score = report.score_overall,
            band = %report.score_band,
            "Environmental report generated"
        );

        match args.output_mode {
            OutputMode::Text => Ok(ReportOutput::Markdown(self.renderer.render_kpi_report(
                ENVIRONMENT_REPORT_TITLE,
                &report,
                decimals,
            ))),
            OutputMode::Json => Ok(ReportOutput::Structured(to_json(&report)?)),
        }
    }

    /// CO2 joins the report only when a calibrated ppm field is known.
    fn kpi_order(&self, co2_field: Option<&str>) -> Vec<&'static str> {
        let mut order = ENV_REPORT_KPIS.to_vec();
        if co2_field.or(self.settings.co2_field.as_deref()).is_some() {
            order.push(CO2_KPI);
        }
        order
    }
}
