//! Typed tool requests.
//!
//! Every tool has its own argument struct; [`ToolRequest`] is the tagged
//! union over them, so malformed arguments are rejected while
//! deserializing instead of inside the handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{StatusMappingSpec, ValidationError};
use crate::domain::kpi::{SocialRecord, WindowSelection};

use super::ToolCall;

/// Default index window of the environmental report: the last 501 samples.
pub const ENV_REPORT_WINDOW: (usize, usize) = (0, 500);

/// Default index window of the social report: the latest period only.
pub const SOCIAL_REPORT_WINDOW: (usize, usize) = (0, 0);

/// Default index window of the DSS report.
pub const DSS_WINDOW: (usize, usize) = (0, 200);

/// Default index window of a raw environmental read: the last five samples.
pub const ENV_READ_WINDOW: (usize, usize) = (0, 4);

/// Default index window of a raw social read: the latest record.
pub const SOCIAL_READ_WINDOW: (usize, usize) = (0, 0);

/// How a report is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Markdown document
    #[default]
    Text,
    /// Structured report
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReportArgs {
    #[serde(flatten)]
    pub window: WindowSelection,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Calibrated CO2 ppm field to report as `co2_ppm`
    #[serde(default)]
    pub co2_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialReportArgs {
    #[serde(flatten)]
    pub window: WindowSelection,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DssReportArgs {
    #[serde(flatten)]
    pub window: WindowSelection,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Pairwise matrices arrive as raw rows; their shape is checked by the
    /// handler so every malformed matrix is reported the same way.
    #[serde(default)]
    pub cat_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub env_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub social_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub financial_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub financial_mock_values: BTreeMap<String, f64>,
    #[serde(default)]
    pub status_mapping: Option<StatusMappingSpec>,
    #[serde(default)]
    pub co2_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSnapshotArgs {
    /// Records used for the trend; defaults to the targets' `trend_window_n`
    #[serde(default)]
    pub window_n: Option<usize>,
    #[serde(default)]
    pub co2_field: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSnapshotArgs {
    #[serde(default)]
    pub facility: Option<String>,
    #[serde(default)]
    pub window_n: Option<usize>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEnvDataArgs {
    #[serde(flatten)]
    pub window: WindowSelection,
    /// Fields to keep besides `timestamp`; all when absent
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadSocialDataArgs {
    #[serde(flatten)]
    pub window: WindowSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialRequirementsArgs {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetKpiTargetsArgs {
    /// `environment`, `social` or absent for the whole file
    #[serde(default)]
    pub section: Option<String>,
    /// Metric filter, only honoured with a section
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
}

/// One request per tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum ToolRequest {
    GenerateEnvironmentReport(EnvironmentReportArgs),
    GenerateSocialReport(SocialReportArgs),
    GenerateDssReport(DssReportArgs),
    EnvKpiSnapshot(EnvSnapshotArgs),
    SocialKpiSnapshot(SocialSnapshotArgs),
    ReadEnvData(ReadEnvDataArgs),
    ReadSocialData(ReadSocialDataArgs),
    UpsertSocialKpis(SocialRecord),
    SocialRequirements(SocialRequirementsArgs),
    GetKpiTargets(GetKpiTargetsArgs),
}

impl ToolRequest {
    pub const NAMES: [&'static str; 10] = [
        "generate_environment_report",
        "generate_social_report",
        "generate_dss_report",
        "env_kpi_snapshot",
        "social_kpi_snapshot",
        "read_env_data",
        "read_social_data",
        "upsert_social_kpis",
        "social_requirements",
        "get_kpi_targets",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::GenerateEnvironmentReport(_) => "generate_environment_report",
            ToolRequest::GenerateSocialReport(_) => "generate_social_report",
            ToolRequest::GenerateDssReport(_) => "generate_dss_report",
            ToolRequest::EnvKpiSnapshot(_) => "env_kpi_snapshot",
            ToolRequest::SocialKpiSnapshot(_) => "social_kpi_snapshot",
            ToolRequest::ReadEnvData(_) => "read_env_data",
            ToolRequest::ReadSocialData(_) => "read_social_data",
            ToolRequest::UpsertSocialKpis(_) => "upsert_social_kpis",
            ToolRequest::SocialRequirements(_) => "social_requirements",
            ToolRequest::GetKpiTargets(_) => "get_kpi_targets",
        }
    }

    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// Builds a typed request from a raw call whose tool name is known.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` on the `args` field when the arguments do not match
    /// the tool's shape.
    pub fn from_call(call: &ToolCall) -> Result<Self, ValidationError> {
        let tagged = serde_json::json!({ "tool": call.name(), "args": call.args() });
        serde_json::from_value(tagged)
            .map_err(|e| ValidationError::invalid_format("args", e.to_string()))
    }

    /// Window selection carried by the request, if any.
    pub fn window(&self) -> Option<&WindowSelection> {
        match self {
            ToolRequest::GenerateEnvironmentReport(args) => Some(&args.window),
            ToolRequest::GenerateSocialReport(args) => Some(&args.window),
            ToolRequest::GenerateDssReport(args) => Some(&args.window),
            ToolRequest::ReadEnvData(args) => Some(&args.window),
            ToolRequest::ReadSocialData(args) => Some(&args.window),
            _ => None,
        }
    }
}
