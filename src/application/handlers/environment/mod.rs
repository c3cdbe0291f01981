//! Environmental tool handlers.
//!
//! ## Queries
//! - Windowed KPI report
//! - Live KPI snapshot
//! - Raw sensor samples

mod env_kpi_snapshot;
mod generate_environment_report;
mod read_env_data;

pub use env_kpi_snapshot::EnvKpiSnapshotHandler;
pub use generate_environment_report::{GenerateEnvironmentReportHandler, ENVIRONMENT_REPORT_TITLE};
pub use read_env_data::ReadEnvDataHandler;
