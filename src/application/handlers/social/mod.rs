//! Social tool handlers.
//!
//! ## Commands
//! - Upserting a facility's KPIs for a period
//!
//! ## Queries
//! - Windowed KPI report
//! - Latest-period snapshot
//! - Stored records
//! - Fields to collect

mod generate_social_report;
mod read_social_data;
mod social_kpi_snapshot;
mod social_requirements;
mod upsert_social_kpis;

// Commands
pub use upsert_social_kpis::{UpsertSocialKpisHandler, SATISFACTION_SCALES};

// Queries
pub use generate_social_report::{GenerateSocialReportHandler, SOCIAL_REPORT_TITLE};
pub use read_social_data::ReadSocialDataHandler;
pub use social_kpi_snapshot::SocialKpiSnapshotHandler;
pub use social_requirements::{SocialRequirements, SocialRequirementsHandler, SOCIAL_REQUIREMENTS_NOTE};
