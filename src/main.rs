//! `esg-advisor` - JSON-lines tool server.
//!
//! Usage:
//!
//! ```text
//! esg-advisor                 serve tool calls from stdin, one per line
//! esg-advisor --tools <mode>  print the tool definitions of a mode and exit
//! ```

use std::error::Error;
use std::sync::Arc;

use tokio::io::{stdin, stdout, BufReader};

use esg_advisor::adapters::{JsonEnvironmentDataset, JsonLinesServer, JsonSocialDataset, JsonTargetStore};
use esg_advisor::application::EsgToolExecutor;
use esg_advisor::config::{AppConfig, LoggingConfig};
use esg_advisor::domain::tools::{AgentMode, ToolRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("--tools") {
        let mode: AgentMode = args.next().as_deref().unwrap_or("env").parse()?;
        let tools = ToolRegistry::with_defaults().to_openai_tools(mode);
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    let executor = EsgToolExecutor::new(
        Arc::new(JsonEnvironmentDataset::new(&config.data.sensor_data_path)),
        Arc::new(JsonSocialDataset::new(&config.data.social_data_path)),
        Arc::new(JsonTargetStore::new(&config.data.kpi_targets_path)),
        config.report_settings(),
    );

    tracing::info!(
        sensor_data = %config.data.sensor_data_path.display(),
        social_data = %config.data.social_data_path.display(),
        targets = %config.data.kpi_targets_path.display(),
        "ESG advisor tool server ready"
    );

    let server = JsonLinesServer::new(Arc::new(executor));
    let replies = server.serve(BufReader::new(stdin()), stdout()).await?;

    tracing::info!(replies, "ESG advisor tool server stopped");
    Ok(())
}

/// Logs go to stderr so stdout carries only replies.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| -> Box<dyn Error> { e })
}
