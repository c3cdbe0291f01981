//! Application handlers.
//!
//! One handler per advisor tool, grouped by agent mode, plus the executor
//! that dispatches typed requests to them.

pub mod dss;
pub mod environment;
pub mod report_settings;
pub mod social;
pub mod targets;
mod tool_executor;

pub use dss::GenerateDssReportHandler;
pub use environment::{
    EnvKpiSnapshotHandler, GenerateEnvironmentReportHandler, ReadEnvDataHandler,
    ENVIRONMENT_REPORT_TITLE,
};
pub use report_settings::{ReportOutput, ReportSettings, MAX_DECIMALS};
pub use social::{
    GenerateSocialReportHandler, ReadSocialDataHandler, SocialKpiSnapshotHandler,
    SocialRequirements, SocialRequirementsHandler, UpsertSocialKpisHandler, SOCIAL_REPORT_TITLE,
};
pub use targets::GetKpiTargetsHandler;
pub use tool_executor::EsgToolExecutor;
