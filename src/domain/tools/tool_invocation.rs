//! Tool invocation entity - audit record for every tool call.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ToolInvocationId};

use super::ToolResult;

/// A recorded tool invocation.
///
/// # Invariants
///
/// - `invoked_at` is before or equal to `completed_at`
/// - `duration_ms` is the difference between the two, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    id: ToolInvocationId,
    tool_name: String,
    parameters: serde_json::Value,
    result: ToolResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    invoked_at: Timestamp,
    completed_at: Timestamp,
    duration_ms: u32,
}

impl ToolInvocation {
    /// Starts a record. Finish it with `complete` or `complete_with_error`.
    pub fn new(tool_name: impl Into<String>, parameters: serde_json::Value) -> Self {
        let now = Timestamp::now();
        Self {
            id: ToolInvocationId::new(),
            tool_name: tool_name.into(),
            parameters,
            result: ToolResult::Success,
            error: None,
            invoked_at: now,
            completed_at: now,
            duration_ms: 0,
        }
    }

    pub fn complete(&mut self) {
        let now = Timestamp::now();
        self.completed_at = now;
        self.duration_ms = self.calculate_duration_ms(now);
        self.result = ToolResult::Success;
        self.error = None;
    }

    pub fn complete_with_error(&mut self, result: ToolResult, message: impl Into<String>) {
        debug_assert!(!result.is_success(), "Use complete() for successful results");
        let now = Timestamp::now();
        self.completed_at = now;
        self.duration_ms = self.calculate_duration_ms(now);
        self.result = result;
        self.error = Some(message.into());
    }

    fn calculate_duration_ms(&self, completed: Timestamp) -> u32 {
        let duration = completed.duration_since(&self.invoked_at);
        duration.num_milliseconds().max(0) as u32
    }

    pub fn id(&self) -> ToolInvocationId {
        self.id
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }

    pub fn result(&self) -> ToolResult {
        self.result
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn invoked_at(&self) -> Timestamp {
        self.invoked_at
    }

    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}
