//! Integration tests for the tool server over JSON files.
//!
//! These tests verify the end-to-end flow:
//! 1. The targets file is bootstrapped on first use
//! 2. Social KPIs written by the upsert tool are read back from disk
//! 3. Environmental, social and DSS reports are computed from the files
//! 4. Broken files surface as configuration errors, not crashes
//!
//! Uses the JSON-file adapters on a temporary directory.

use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;

use esg_advisor::adapters::{
    JsonEnvironmentDataset, JsonLinesServer, JsonSocialDataset, JsonTargetStore,
};
use esg_advisor::application::{EsgToolExecutor, ReportSettings};
use esg_advisor::domain::tools::{ToolCall, ToolResult};
use esg_advisor::ports::ToolExecutor;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn sensor_samples() -> Value {
    json!([
        {"timestamp": "2025-09-15T10:00:00", "temperature": 26.0, "humidity": 55.0, "light": 90.0, "acceleration": 0.5},
        {"timestamp": "2025-09-15T10:01:00", "temperature": 27.0, "humidity": 56.0, "light": 92.0, "acceleration": 0.6},
        {"timestamp": "2025-09-15T10:02:00", "temperature": 28.0, "humidity": 57.0, "light": 95.0, "acceleration": 0.4},
        {"timestamp": "2025-10-01T08:00:00", "temperature": 33.0, "humidity": 68.0, "light": 60.0},
        {"temperature": 99.0}
    ])
}

struct Workspace {
    _dir: tempfile::TempDir,
    sensors: std::path::PathBuf,
    social: std::path::PathBuf,
    targets: std::path::PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        let sensors = data.join("sensor_timeseries.json");
        std::fs::write(&sensors, sensor_samples().to_string()).unwrap();
        Self {
            sensors,
            social: data.join("social_kpis.json"),
            targets: data.join("kpi_targets.json"),
            _dir: dir,
        }
    }

    fn executor(&self) -> EsgToolExecutor {
        self.executor_with(ReportSettings::default())
    }

    fn executor_with(&self, settings: ReportSettings) -> EsgToolExecutor {
        EsgToolExecutor::new(
            Arc::new(JsonEnvironmentDataset::new(&self.sensors)),
            Arc::new(JsonSocialDataset::new(&self.social)),
            Arc::new(JsonTargetStore::new(&self.targets)),
            settings,
        )
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn call(executor: &EsgToolExecutor, tool: &str, args: Value) -> esg_advisor::domain::tools::ToolResponse {
    executor.dispatch(ToolCall::new(tool, args)).await
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn targets_file_is_bootstrapped_on_first_query() {
    let ws = Workspace::new();
    assert!(!ws.targets.exists());

    let response = call(&ws.executor(), "get_kpi_targets", json!({"section": "environment"})).await;

    assert!(response.is_success());
    assert!(ws.targets.exists());
    let on_disk = read_json(&ws.targets);
    assert_eq!(on_disk["environment"]["distance_mm"]["target"], 120.0);
    assert_eq!(on_disk["social"]["satisfaction_index"]["scale"], 100.0);
}

#[tokio::test]
async fn upserted_social_kpis_survive_a_new_executor() {
    let ws = Workspace::new();
    let record = json!({
        "facility": "Plant A",
        "period_start": "2025-01-01",
        "period_end": "2025-03-31",
        "turnover_pct": 12.0,
        "satisfaction_index": 8.5,
        "satisfaction_scale": 10
    });

    let first = call(&ws.executor(), "upsert_social_kpis", record.clone()).await;
    assert!(first.is_success());
    let again = call(&ws.executor(), "upsert_social_kpis", record).await;
    assert_eq!(again.data().unwrap()["replaced"], true);

    let stored = read_json(&ws.social);
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert!(stored[0]["saved_at"].as_str().unwrap().ends_with('Z'));

    let report = call(
        &ws.executor(),
        "generate_social_report",
        json!({"facility": "Plant A", "output_mode": "json"}),
    )
    .await;
    let data = report.data().unwrap();
    assert_eq!(data["kpis"]["turnover_pct"]["status"], "yellow");
    assert_eq!(data["kpis"]["satisfaction_index"]["current"], 85.0);
    assert_eq!(data["kpis"]["satisfaction_index"]["status"], "green");
}

#[tokio::test]
async fn environment_report_by_date_uses_only_that_month() {
    let ws = Workspace::new();
    let response = call(
        &ws.executor(),
        "generate_environment_report",
        json!({"by": "date", "date_start": "2025-09", "date_end": "2025-09", "output_mode": "json"}),
    )
    .await;

    let data = response.data().unwrap();
    assert_eq!(data["kpis"]["temperature"]["current"], 27.0);
    assert_eq!(data["kpis"]["temperature"]["status"], "green");
    assert_eq!(data["kpis"]["energy_specific"]["status"], "not_available");
}

#[tokio::test]
async fn unparseable_date_bound_is_a_validation_error() {
    let ws = Workspace::new();
    let response = call(
        &ws.executor(),
        "generate_environment_report",
        json!({"by": "date", "date_start": "settembre"}),
    )
    .await;
    assert_eq!(response.result(), ToolResult::ValidationError);
}

#[tokio::test]
async fn snapshot_reports_raw_air_quality_without_calibration() {
    let ws = Workspace::new();
    let response = call(&ws.executor(), "env_kpi_snapshot", json!({})).await;

    let data = response.data().unwrap();
    assert_eq!(data["kpis"]["temperature"]["current"], 33.0);
    assert_eq!(data["kpis"]["co2_ppm"]["status"], "not_available");
}

#[tokio::test]
async fn dss_report_combines_files() {
    let ws = Workspace::new();
    call(
        &ws.executor(),
        "upsert_social_kpis",
        json!({"facility": "Plant A", "period_start": "2025-07-01", "period_end": "2025-09-30", "turnover_pct": 4.0}),
    )
    .await;

    let settings = ReportSettings {
        plant_name: Some("Plant A".into()),
        ..ReportSettings::default()
    };
    let response = call(
        &ws.executor_with(settings),
        "generate_dss_report",
        json!({"facility": "Plant A"}),
    )
    .await;

    let markdown = response.text().unwrap();
    assert!(markdown.starts_with("# Report DSS (AHP)"));
    assert!(markdown.contains("## Pesi di categoria"));
    assert!(markdown.contains("| Indicatore | Categoria | Peso finale | Valore norm. | Contributo | Gap |"));
}

#[tokio::test]
async fn corrupt_targets_are_a_configuration_error() {
    let ws = Workspace::new();
    std::fs::write(&ws.targets, "{ not json").unwrap();

    let response = call(&ws.executor(), "generate_environment_report", json!({})).await;

    assert_eq!(response.result(), ToolResult::ConfigurationError);
    assert_eq!(std::fs::read_to_string(&ws.targets).unwrap(), "{ not json");
}

#[tokio::test]
async fn missing_sensor_file_yields_not_available_kpis() {
    let ws = Workspace::new();
    std::fs::remove_file(&ws.sensors).unwrap();

    let response = call(
        &ws.executor(),
        "generate_environment_report",
        json!({"output_mode": "json"}),
    )
    .await;

    let data = response.data().unwrap();
    assert_eq!(data["kpis"]["temperature"]["status"], "not_available");
    assert_eq!(data["score_overall"], 0.0);
}

#[tokio::test]
async fn json_lines_server_answers_each_line() {
    let ws = Workspace::new();
    let server = JsonLinesServer::new(Arc::new(ws.executor()));
    let input = concat!(
        "{\"tool\":\"read_env_data\",\"args\":{\"idx_end\":1,\"fields\":[\"temperature\"]}}\n",
        "{\"tool\":\"nope\"}\n",
    );

    let mut output = Vec::new();
    let replies = server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();
    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(replies, 2);
    assert_eq!(lines[0]["data"]["count"], 2);
    assert_eq!(lines[0]["data"]["records"][0]["timestamp"], "2025-10-01T08:00:00");
    assert!(lines[0]["data"]["records"][0].get("humidity").is_none());
    assert_eq!(lines[1]["result"], "not_found");
}
