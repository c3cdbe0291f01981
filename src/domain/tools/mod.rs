//! Advisor Tools - the surface the LLM agent calls.
//!
//! ## Key Types
//!
//! - [`ToolRequest`] - Typed request, one variant per tool
//! - [`ToolCall`] - Raw name + arguments as produced by function calling
//! - [`ToolResponse`] - Structured answer returned to the agent
//! - [`ToolResult`] - Outcome category of an execution
//! - [`ToolInvocation`] - Audit record of every call
//! - [`ToolDefinition`] / [`ToolRegistry`] - Schemas grouped by [`AgentMode`]

pub mod definitions;
pub mod request;
mod tool_call;
mod tool_definition;
mod tool_invocation;
mod tool_registry;
mod tool_result;

pub use request::{
    DssReportArgs, EnvSnapshotArgs, EnvironmentReportArgs, GetKpiTargetsArgs, OutputMode,
    ReadEnvDataArgs, ReadSocialDataArgs, SocialReportArgs, SocialRequirementsArgs,
    SocialSnapshotArgs, ToolRequest,
};
pub use tool_call::{ToolCall, ToolResponse};
pub use tool_definition::ToolDefinition;
pub use tool_invocation::ToolInvocation;
pub use tool_registry::{AgentMode, ToolRegistry};
pub use tool_result::ToolResult;
