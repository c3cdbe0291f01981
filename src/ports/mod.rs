//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Ports
//!
//! - `EnvironmentDataset` - Sensor time series
//! - `SocialDataset` - Periodic social KPI records, with upsert
//! - `TargetStore` - KPI target definitions, bootstrapped when missing
//!
//! ## Tool Ports
//!
//! - `ToolExecutor` - Validates and executes agent tool calls

mod dataset;
mod target_store;
mod tool_executor;

pub use dataset::{DatasetError, EnvironmentDataset, SocialDataset, UpsertOutcome};
pub use target_store::{TargetStore, TargetStoreError};
pub use tool_executor::{ToolExecutionError, ToolExecutor};
