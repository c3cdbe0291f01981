//! Application layer - Tool handlers and the executor.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (social upsert) write through the dataset port; every other tool
//! is a query over already stored data.

pub mod handlers;

pub use handlers::{EsgToolExecutor, ReportOutput, ReportSettings};
