//! EsgToolExecutor - dispatches typed tool requests to their handlers.
//!
//! Every execution is wrapped in a [`ToolInvocation`] audit record that is
//! emitted through `tracing` once the handler returns.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::application::handlers::dss::GenerateDssReportHandler;
use crate::application::handlers::environment::{
    EnvKpiSnapshotHandler, GenerateEnvironmentReportHandler, ReadEnvDataHandler,
};
use crate::application::handlers::report_settings::{to_json, ReportSettings};
use crate::application::handlers::social::{
    GenerateSocialReportHandler, ReadSocialDataHandler, SocialKpiSnapshotHandler,
    SocialRequirementsHandler, UpsertSocialKpisHandler,
};
use crate::application::handlers::targets::GetKpiTargetsHandler;
use crate::domain::foundation::DomainError;
use crate::domain::tools::{
    AgentMode, ToolCall, ToolDefinition, ToolInvocation, ToolRegistry, ToolRequest, ToolResponse,
};
use crate::ports::{
    EnvironmentDataset, SocialDataset, TargetStore, ToolExecutionError, ToolExecutor,
};

/// Tool executor backed by the dataset and target ports.
pub struct EsgToolExecutor {
    registry: ToolRegistry,
    environment_report: GenerateEnvironmentReportHandler,
    env_snapshot: EnvKpiSnapshotHandler,
    read_env: ReadEnvDataHandler,
    social_report: GenerateSocialReportHandler,
    social_snapshot: SocialKpiSnapshotHandler,
    read_social: ReadSocialDataHandler,
    upsert_social: UpsertSocialKpisHandler,
    social_requirements: SocialRequirementsHandler,
    dss_report: GenerateDssReportHandler,
    targets: GetKpiTargetsHandler,
}

impl EsgToolExecutor {
    pub fn new(
        environment: Arc<dyn EnvironmentDataset>,
        social: Arc<dyn SocialDataset>,
        targets: Arc<dyn TargetStore>,
        settings: ReportSettings,
    ) -> Self {
        let settings = Arc::new(settings);
        Self {
            registry: ToolRegistry::with_defaults(),
            environment_report: GenerateEnvironmentReportHandler::new(
                environment.clone(),
                targets.clone(),
                settings.clone(),
            ),
            env_snapshot: EnvKpiSnapshotHandler::new(
                environment.clone(),
                targets.clone(),
                settings.clone(),
            ),
            read_env: ReadEnvDataHandler::new(environment.clone()),
            social_report: GenerateSocialReportHandler::new(
                social.clone(),
                targets.clone(),
                settings.clone(),
            ),
            social_snapshot: SocialKpiSnapshotHandler::new(
                social.clone(),
                targets.clone(),
                settings.clone(),
            ),
            read_social: ReadSocialDataHandler::new(social.clone()),
            upsert_social: UpsertSocialKpisHandler::new(social.clone()),
            social_requirements: SocialRequirementsHandler::new(),
            dss_report: GenerateDssReportHandler::new(environment, social, targets.clone(), settings),
            targets: GetKpiTargetsHandler::new(targets),
        }
    }

    /// Replaces the tool registry, e.g. to expose a reduced tool set.
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn run(&self, request: ToolRequest) -> Result<Value, DomainError> {
        match request {
            ToolRequest::GenerateEnvironmentReport(args) => {
                Ok(self.environment_report.handle(args).await?.into_value())
            }
            ToolRequest::GenerateSocialReport(args) => {
                Ok(self.social_report.handle(args).await?.into_value())
            }
            ToolRequest::GenerateDssReport(args) => {
                Ok(self.dss_report.handle(args).await?.into_value())
            }
            ToolRequest::EnvKpiSnapshot(args) => self.env_snapshot.handle(args).await,
            ToolRequest::SocialKpiSnapshot(args) => self.social_snapshot.handle(args).await,
            ToolRequest::ReadEnvData(args) => self.read_env.handle(args).await,
            ToolRequest::ReadSocialData(args) => self.read_social.handle(args).await,
            ToolRequest::UpsertSocialKpis(record) => self.upsert_social.handle(record).await,
            ToolRequest::SocialRequirements(_) => to_json(&self.social_requirements.handle()),
            ToolRequest::GetKpiTargets(args) => self.targets.handle(args).await,
        }
    }
}

#[async_trait]
impl ToolExecutor for EsgToolExecutor {
    async fn execute(&self, request: ToolRequest) -> Result<ToolResponse, ToolExecutionError> {
        let parameters = serde_json::to_value(&request).unwrap_or(Value::Null);
        let mut invocation = ToolInvocation::new(request.name(), parameters);
        tracing::debug!(tool = request.name(), invocation_id = %invocation.id(), "Tool started");

        match self.run(request).await {
            Ok(data) => {
                invocation.complete();
                record(&invocation);
                tracing::info!(
                    tool = invocation.tool_name(),
                    invocation_id = %invocation.id(),
                    duration_ms = invocation.duration_ms(),
                    result = ?invocation.result(),
                    "Tool completed"
                );
                Ok(ToolResponse::success(data))
            }
            Err(err) => {
                let err = ToolExecutionError::from(err);
                invocation.complete_with_error(err.result(), err.to_string());
                record(&invocation);
                tracing::warn!(
                    tool = invocation.tool_name(),
                    invocation_id = %invocation.id(),
                    duration_ms = invocation.duration_ms(),
                    result = ?invocation.result(),
                    error = invocation.error().unwrap_or_default(),
                    "Tool failed"
                );
                Err(err)
            }
        }
    }

    fn available_tools(&self, mode: AgentMode, include_cross_cutting: bool) -> Vec<ToolDefinition> {
        self.registry
            .tools_for_mode(mode, include_cross_cutting)
            .into_iter()
            .cloned()
            .collect()
    }

    fn validate(&self, call: &ToolCall) -> Result<ToolRequest, ToolExecutionError> {
        if !self.registry.has_tool(call.name()) || !ToolRequest::is_known(call.name()) {
            return Err(ToolExecutionError::ToolNotFound(call.name().to_string()));
        }
        Ok(ToolRequest::from_call(call)?)
    }

    fn has_tool(&self, name: &str) -> bool {
        self.registry.has_tool(name)
    }

    fn get_tool(&self, name: &str) -> Option<ToolDefinition> {
        self.registry.get_tool(name).cloned()
    }
}

/// Emits the full audit record, parameters included.
fn record(invocation: &ToolInvocation) {
    if let Ok(audit) = serde_json::to_string(invocation) {
        tracing::debug!(audit = %audit, "Tool invocation recorded");
    }
}
