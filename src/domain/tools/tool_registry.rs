//! Tool Registry - tool definitions grouped by agent mode.
//!
//! Each mode (`env`, `social`, `dss`) sees its own tools plus the
//! cross-cutting ones, in registration order.
//!
//! # Example
//!
//! ```
//! use esg_advisor::domain::tools::{AgentMode, ToolRegistry};
//!
//! let registry = ToolRegistry::with_defaults();
//! let names: Vec<&str> = registry
//!     .tools_for_mode(AgentMode::Dss, true)
//!     .iter()
//!     .map(|t| t.name())
//!     .collect();
//! assert_eq!(names, vec!["generate_dss_report", "get_kpi_targets"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::definitions;
use super::ToolDefinition;

/// Agent persona the tool set is exposed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    Env,
    Social,
    Dss,
}

impl AgentMode {
    pub fn all() -> [AgentMode; 3] {
        [AgentMode::Env, AgentMode::Social, AgentMode::Dss]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentMode::Env => "env",
            AgentMode::Social => "social",
            AgentMode::Dss => "dss",
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "env" => Ok(AgentMode::Env),
            "social" => Ok(AgentMode::Social),
            "dss" => Ok(AgentMode::Dss),
            other => Err(ValidationError::invalid_format(
                "mode",
                format!("'{}' is not one of env, social, dss", other),
            )),
        }
    }
}

/// Registry of tool definitions.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
    mode_tools: HashMap<AgentMode, Vec<String>>,
    cross_cutting_tools: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every tool of the advisor.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for tool in definitions::environment_tools() {
            registry.register_for_mode(tool, AgentMode::Env);
        }
        for tool in definitions::social_tools() {
            registry.register_for_mode(tool, AgentMode::Social);
        }
        for tool in definitions::dss_tools() {
            registry.register_for_mode(tool, AgentMode::Dss);
        }
        for tool in definitions::cross_cutting_tools() {
            registry.register_cross_cutting(tool);
        }
        registry
    }

    pub fn register_for_mode(&mut self, definition: ToolDefinition, mode: AgentMode) {
        let name = definition.name().to_string();
        self.tools.insert(name.clone(), definition);
        self.mode_tools.entry(mode).or_default().push(name);
    }

    /// Registers a tool available in every mode.
    pub fn register_cross_cutting(&mut self, definition: ToolDefinition) {
        let name = definition.name().to_string();
        self.tools.insert(name.clone(), definition);
        self.cross_cutting_tools.push(name);
    }

    /// Mode-specific tools first, then cross-cutting ones if requested.
    pub fn tools_for_mode(&self, mode: AgentMode, include_cross_cutting: bool) -> Vec<&ToolDefinition> {
        let mode_names = self.mode_tools.get(&mode).into_iter().flatten();
        let cross = self
            .cross_cutting_tools
            .iter()
            .filter(|_| include_cross_cutting);
        mode_names
            .chain(cross)
            .filter_map(|name| self.tools.get(name))
            .collect()
    }

    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_available_for_mode(&self, name: &str, mode: AgentMode) -> bool {
        self.cross_cutting_tools.iter().any(|n| n == name)
            || self
                .mode_tools
                .get(&mode)
                .is_some_and(|names| names.iter().any(|n| n == name))
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn to_openai_tools(&self, mode: AgentMode) -> Vec<serde_json::Value> {
        self.tools_for_mode(mode, true)
            .iter()
            .map(|tool| tool.to_openai_format())
            .collect()
    }
}
