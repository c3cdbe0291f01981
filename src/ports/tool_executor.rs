//! Tool Executor Port - Interface for executing advisor tools.
//!
//! This port abstracts the execution of tools invoked by the LLM agent.
//! Tools read the datasets and targets, run the KPI or DSS analysis and
//! return a report.
//!
//! # Design
//!
//! - Raw calls are validated into a typed [`ToolRequest`] before execution
//! - Every failure is mapped to a structured [`ToolResponse`], so the agent
//!   always gets an answer it can reason about
//! - Tools are filtered per [`AgentMode`]
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use esg_advisor::ports::ToolExecutor;
//!
//! struct ReportExecutor { /* ... */ }
//!
//! #[async_trait]
//! impl ToolExecutor for ReportExecutor {
//!     async fn execute(&self, request: ToolRequest) -> Result<ToolResponse, ToolExecutionError> {
//!         // 1. Load dataset and targets
//!         // 2. Run the analysis
//!         // 3. Render the report
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::tools::{
    AgentMode, ToolCall, ToolDefinition, ToolRequest, ToolResponse, ToolResult,
};

/// Port for executing advisor tools.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a validated request.
    ///
    /// # Returns
    ///
    /// * `Ok(ToolResponse)` - Tool executed (check `is_success()` for outcome)
    /// * `Err(ToolExecutionError)` - Execution failed (storage, corrupt targets, etc.)
    async fn execute(&self, request: ToolRequest) -> Result<ToolResponse, ToolExecutionError>;

    /// Get the tools exposed to an agent mode.
    ///
    /// # Arguments
    ///
    /// * `mode` - The agent mode (env, social, dss)
    /// * `include_cross_cutting` - Whether to include tools available in every mode
    fn available_tools(&self, mode: AgentMode, include_cross_cutting: bool) -> Vec<ToolDefinition>;

    /// Validate a raw call into a typed request without executing it.
    fn validate(&self, call: &ToolCall) -> Result<ToolRequest, ToolExecutionError>;

    /// Check if a tool exists.
    fn has_tool(&self, name: &str) -> bool;

    /// Get a tool definition by name.
    fn get_tool(&self, name: &str) -> Option<ToolDefinition>;

    /// Validate then execute, folding every failure into a response.
    async fn dispatch(&self, call: ToolCall) -> ToolResponse {
        let request = match self.validate(&call) {
            Ok(request) => request,
            Err(err) => return err.into_response(),
        };
        match self.execute(request).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }
}

/// Errors that can occur during tool execution.
#[derive(Debug, Clone, Error)]
pub enum ToolExecutionError {
    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Parameter validation failed
    #[error("Validation error: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Domain error during execution
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    /// Infrastructure/system error
    #[error("System error: {0}")]
    SystemError(String),
}

impl ToolExecutionError {
    /// Creates a system error.
    pub fn system(message: impl Into<String>) -> Self {
        Self::SystemError(message.into())
    }

    /// Outcome category reported to the agent.
    pub fn result(&self) -> ToolResult {
        match self {
            Self::ToolNotFound(_) => ToolResult::NotFound,
            Self::ValidationFailed(_) => ToolResult::ValidationError,
            Self::DomainError(err) => match err.code {
                ErrorCode::ConfigurationError
                | ErrorCode::TargetsCorrupt
                | ErrorCode::DatasetCorrupt => ToolResult::ConfigurationError,
                ErrorCode::ValidationFailed
                | ErrorCode::EmptyField
                | ErrorCode::OutOfRange
                | ErrorCode::InvalidFormat => ToolResult::ValidationError,
                ErrorCode::ToolNotFound | ErrorCode::SectionNotFound => ToolResult::NotFound,
                ErrorCode::StorageError | ErrorCode::InternalError => ToolResult::InternalError,
            },
            Self::SystemError(_) => ToolResult::InternalError,
        }
    }

    /// Converts the error into a failed response for the agent.
    pub fn into_response(self) -> ToolResponse {
        let result = self.result();
        match self {
            Self::ToolNotFound(name) => {
                ToolResponse::error(result, format!("Tool '{}' non disponibile.", name))
                    .with_details(serde_json::json!({ "available": ToolRequest::NAMES }))
            }
            Self::DomainError(err) if !err.details.is_empty() => {
                let details = serde_json::to_value(&err.details).unwrap_or_default();
                ToolResponse::error(result, err.message).with_details(details)
            }
            Self::DomainError(err) => ToolResponse::error(result, err.message),
            other => ToolResponse::error(result, other.to_string()),
        }
    }
}
