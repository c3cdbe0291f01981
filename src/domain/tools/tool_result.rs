//! Tool execution outcome.

use serde::{Deserialize, Serialize};

/// Category of a tool execution outcome.
///
/// Lets the caller tell a bad request apart from a broken installation
/// (e.g. a corrupt targets file) or an unexpected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolResult {
    Success,

    /// Arguments failed validation (missing field, bad matrix, unparseable date)
    ValidationError,

    /// Unknown tool, section or record
    NotFound,

    /// Targets or datasets cannot be read as stored
    ConfigurationError,

    /// Unexpected failure (I/O and the like)
    InternalError,
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Internal errors may be transient; the others need a changed request
    /// or a repaired file.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InternalError)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Tool executed successfully",
            Self::ValidationError => "Tool arguments failed validation",
            Self::NotFound => "Requested tool or entry not found",
            Self::ConfigurationError => "Stored configuration or data is invalid",
            Self::InternalError => "Unexpected system error occurred",
        }
    }
}

impl std::fmt::Display for ToolResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
