//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the ESG advisor domain.

mod errors;
mod ids;
mod status;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ToolInvocationId;
pub use status::{KpiStatus, StatusMapping, StatusMappingPreset, StatusMappingSpec};
pub use timestamp::{BoundSide, Timestamp};
