//! Targets query handler.

mod get_kpi_targets;

pub use get_kpi_targets::{GetKpiTargetsHandler, TARGET_SECTIONS};
