//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, timestamps, IDs, statuses)
//! - `kpi` - Targets, classification, trends, windowing and KPI aggregation
//! - `analysis` - AHP weighting and the DSS combiner
//! - `tools` - Typed tool requests, definitions and responses for the agent

pub mod analysis;
pub mod foundation;
pub mod kpi;
pub mod tools;
