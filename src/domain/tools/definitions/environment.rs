//! Environmental tools - windowed report, live snapshot and raw sensor reads.

use serde_json::json;

use super::{object_schema, report_properties, report_returns, window_properties};
use crate::domain::tools::request::{ENV_READ_WINDOW, ENV_REPORT_WINDOW};
use crate::domain::tools::ToolDefinition;

fn co2_field_property() -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert(
        "co2_field".to_string(),
        json!({
            "type": "string",
            "description": "Campo CO₂ calibrato in ppm (es. 'co2_ppm'); senza, si mostra air_quality_raw come indice non calibrato"
        }),
    );
    map
}

pub fn generate_environment_report_tool() -> ToolDefinition {
    let (start, end) = ENV_REPORT_WINDOW;
    ToolDefinition::new(
        "generate_environment_report",
        "(Ambientale) Report KPI ambientali sulla finestra selezionata: valori medi, stato rispetto ai target, trend, score e raccomandazioni.",
        object_schema(
            vec![window_properties(start, end), report_properties(1), co2_field_property()],
            &[],
        ),
        report_returns(),
    )
}

pub fn env_kpi_snapshot_tool() -> ToolDefinition {
    let mut params = co2_field_property();
    params.insert(
        "window_n".to_string(),
        json!({
            "type": "integer",
            "minimum": 1,
            "maximum": 200,
            "description": "Misure usate per il trend; se assente usa trend_window_n dai target"
        }),
    );
    params.insert(
        "decimals".to_string(),
        json!({ "type": "integer", "minimum": 0, "maximum": 6, "default": 1 }),
    );
    ToolDefinition::new(
        "env_kpi_snapshot",
        "(Ambientale) Snapshot dei KPI ambientali sull'ultima misura, con trend sulle ultime N misure.",
        object_schema(vec![params], &[]),
        json!({
            "type": "object",
            "properties": {
                "window": { "type": "object" },
                "kpis": { "type": "object" },
                "score": { "type": ["number", "null"] },
                "missing_fields": { "type": "array", "items": { "type": "string" } },
                "targets_used": { "type": "object" }
            }
        }),
    )
}

pub fn read_env_data_tool() -> ToolDefinition {
    let (start, end) = ENV_READ_WINDOW;
    let mut fields = serde_json::Map::new();
    fields.insert(
        "fields".to_string(),
        json!({
            "type": "array",
            "items": { "type": "string" },
            "description": "Campi da restituire oltre a 'timestamp'"
        }),
    );
    ToolDefinition::new(
        "read_env_data",
        "(Ambientale) Legge le misure dei sensori per indice o intervallo di date.",
        object_schema(vec![window_properties(start, end), fields], &[]),
        json!({
            "type": "object",
            "properties": {
                "source": { "type": "string" },
                "count": { "type": "integer" },
                "fields": {},
                "window": { "type": "object" },
                "records": { "type": "array" }
            }
        }),
    )
}

pub fn environment_tools() -> Vec<ToolDefinition> {
    vec![
        generate_environment_report_tool(),
        env_kpi_snapshot_tool(),
        read_env_data_tool(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_to_last_five_hundred_samples() {
        let tool = generate_environment_report_tool();
        assert_eq!(tool.parameters_schema()["properties"]["idx_end"]["default"], 500);
        assert_eq!(tool.parameters_schema()["properties"]["decimals"]["default"], 1);
    }

    #[test]
    fn read_defaults_to_last_five_samples() {
        let tool = read_env_data_tool();
        assert_eq!(tool.parameters_schema()["properties"]["idx_end"]["default"], 4);
        assert!(tool.parameters_schema()["properties"]["fields"].is_object());
    }

    #[test]
    fn snapshot_accepts_co2_field() {
        let tool = env_kpi_snapshot_tool();
        assert!(tool.parameters_schema()["properties"]["co2_field"].is_object());
        assert_eq!(tool.parameters_schema()["properties"]["window_n"]["minimum"], 1);
    }
}
