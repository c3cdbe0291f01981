//! Tool call and response value objects.

use serde::{Deserialize, Serialize};

use super::ToolResult;

/// A raw request to invoke a tool by name, as produced by function calling.
///
/// Converted into a typed [`super::ToolRequest`] before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(alias = "name")]
    tool: String,

    #[serde(default = "empty_object", alias = "parameters")]
    args: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            tool: tool.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool
    }

    pub fn args(&self) -> &serde_json::Value {
        &self.args
    }

    pub fn into_args(self) -> serde_json::Value {
        self.args
    }
}

/// Response from executing a tool.
///
/// Reports always come back in `data`: a markdown string in text mode, the
/// structured report in JSON mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    success: bool,

    result: ToolResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    /// Extra diagnostics attached to an error (e.g. available sections)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

impl ToolResponse {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            result: ToolResult::Success,
            data: Some(data),
            error: None,
            details: None,
            suggestions: Vec::new(),
        }
    }

    /// Creates an error response in the given category.
    pub fn error(result: ToolResult, message: impl Into<String>) -> Self {
        debug_assert!(!result.is_success(), "Use success() for successful results");
        Self {
            success: false,
            result,
            data: None,
            error: Some(message.into()),
            details: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn result(&self) -> ToolResult {
        self.result
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// Markdown body of a text-mode response.
    pub fn text(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_accepts_both_field_spellings() {
        let a: ToolCall = serde_json::from_str(r#"{"tool":"social_requirements"}"#).unwrap();
        assert_eq!(a.name(), "social_requirements");
        assert_eq!(a.args(), &serde_json::json!({}));

        let b: ToolCall =
            serde_json::from_str(r#"{"name":"read_env_data","parameters":{"idx_end":3}}"#).unwrap();
        assert_eq!(b.name(), "read_env_data");
        assert_eq!(b.into_args()["idx_end"], 3);
    }

    #[test]
    fn success_response_carries_data() {
        let response = ToolResponse::success(serde_json::json!("# Report"));
        assert!(response.is_success());
        assert_eq!(response.result(), ToolResult::Success);
        assert_eq!(response.text(), Some("# Report"));
        assert!(response.error_message().is_none());
    }

    #[test]
    fn error_response_carries_category_and_details() {
        let response = ToolResponse::error(ToolResult::NotFound, "Sezione 'x' non trovata nei target.")
            .with_details(serde_json::json!({"available": ["environment", "social"]}))
            .with_suggestion("Usa 'environment' o 'social'.");

        assert!(!response.is_success());
        assert_eq!(response.result(), ToolResult::NotFound);
        assert_eq!(response.details().unwrap()["available"][1], "social");
        assert_eq!(response.suggestions().len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"], "not_found");
        assert!(json.get("data").is_none());
    }
}
