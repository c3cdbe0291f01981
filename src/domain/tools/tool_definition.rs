//! Tool definition - schema and metadata for a tool exposed to the LLM agent.

use serde::{Deserialize, Serialize};

/// Definition of a tool the agent can invoke.
///
/// Carries the JSON schemas used for function calling and for documenting
/// what each tool returns.
///
/// # Examples
///
/// ```
/// use esg_advisor::domain::tools::ToolDefinition;
///
/// let definition = ToolDefinition::new(
///     "env_kpi_snapshot",
///     "Snapshot of the latest environmental KPIs",
///     serde_json::json!({
///         "type": "object",
///         "properties": {
///             "window_n": { "type": "integer", "minimum": 1 }
///         }
///     }),
///     serde_json::json!({ "type": "object" }),
/// );
/// assert_eq!(definition.name(), "env_kpi_snapshot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    name: String,
    description: String,
    parameters_schema: serde_json::Value,
    returns_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
        returns_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
            returns_schema,
        }
    }

    /// Definition for a tool without parameters.
    pub fn without_parameters(
        name: impl Into<String>,
        description: impl Into<String>,
        returns_schema: serde_json::Value,
    ) -> Self {
        Self::new(
            name,
            description,
            serde_json::json!({ "type": "object", "properties": {} }),
            returns_schema,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    pub fn returns_schema(&self) -> &serde_json::Value {
        &self.returns_schema
    }

    /// Converts to OpenAI function calling format.
    pub fn to_openai_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters_schema
            }
        })
    }
}
