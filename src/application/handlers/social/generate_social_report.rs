//! GenerateSocialReportHandler - social KPI report per facility and period.

use std::sync::Arc;

use crate::adapters::MarkdownReportRenderer;
use crate::application::handlers::report_settings::{to_json, ReportOutput, ReportSettings};
use crate::domain::foundation::DomainError;
use crate::domain::kpi::catalog::SOCIAL_KPIS;
use crate::domain::kpi::{KpiAggregator, ReportOptions, WindowSelector};
use crate::domain::tools::request::SOCIAL_REPORT_WINDOW;
use crate::domain::tools::{OutputMode, SocialReportArgs};
use crate::ports::{SocialDataset, TargetStore};

pub const SOCIAL_REPORT_TITLE: &str = "Report KPI Sociali";

pub struct GenerateSocialReportHandler {
    dataset: Arc<dyn SocialDataset>,
    targets: Arc<dyn TargetStore>,
    renderer: MarkdownReportRenderer,
    settings: Arc<ReportSettings>,
}

impl GenerateSocialReportHandler {
    pub fn new(
        dataset: Arc<dyn SocialDataset>,
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

    pub async fn handle(&self, args: SocialReportArgs) -> Result<ReportOutput, DomainError> {
        let decimals = ReportSettings::decimals_or(args.decimals, self.settings.decimals)?;
        let (start, end) = SOCIAL_REPORT_WINDOW;
        let selection = args.window.with_index_defaults(start, end);
        selection.validate()?;

        let targets = self.targets.load().await?;
        let records = self.dataset.load().await?;
        let window = WindowSelector::select_social(&records, &selection);

        let options = ReportOptions::new(decimals, targets.social_window_n())
            .with_facility(selection.facility.clone());
        let report = KpiAggregator::aggregate(&window, &targets.social, SOCIAL_KPIS, &options);

        tracing::info!(
            facility = report.facility.as_deref().unwrap_or("N/D"),
            periods = window.len(),
            score = report.score_overall,
            "Social report generated"
        );

        match args.output_mode {
            OutputMode::Text => Ok(ReportOutput::Markdown(self.renderer.render_kpi_report(
                SOCIAL_REPORT_TITLE,
                &report,
                decimals,
            ))),
            OutputMode::Json => Ok(ReportOutput::Structured(to_json(&report)?)),
        }
    }
}
