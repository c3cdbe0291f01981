//! Line protocol of the tool server.
//!
//! Client → server: one JSON object per line, either a tool call
//! (`{"tool": "...", "args": {...}}`) or a tool listing request
//! (`{"list_tools": "env"}`).
//!
//! Server → client: one JSON object per line, a `ToolResponse` or the
//! tool definitions of a mode in OpenAI function format.

use serde::{Deserialize, Serialize};

use crate::domain::tools::{AgentMode, ToolCall, ToolResponse};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClientMessage {
    ListTools { list_tools: AgentMode },
    Call(ToolCall),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Response(ToolResponse),
    Tools {
        mode: AgentMode,
        tools: Vec<serde_json::Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call_and_listing() {
        let call: ClientMessage =
            serde_json::from_str(r#"{"tool":"social_requirements"}"#).unwrap();
        assert!(matches!(call, ClientMessage::Call(ref c) if c.name() == "social_requirements"));

        let list: ClientMessage = serde_json::from_str(r#"{"list_tools":"dss"}"#).unwrap();
        assert_eq!(list, ClientMessage::ListTools { list_tools: AgentMode::Dss });
    }

    #[test]
    fn function_calling_shape_is_accepted() {
        let call: ClientMessage =
            serde_json::from_str(r#"{"name":"read_env_data","parameters":{"idx_end":2}}"#).unwrap();
        match call {
            ClientMessage::Call(call) => assert_eq!(call.args()["idx_end"], 2),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
