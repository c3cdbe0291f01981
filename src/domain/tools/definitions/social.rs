//! Social tools - report, snapshot, stored-record reads, upsert and the
//! list of fields to collect.

use serde_json::{json, Map, Value};

use super::{object_schema, report_properties, report_returns, window_properties};
use crate::domain::kpi::catalog::SOCIAL_KPIS;
use crate::domain::tools::request::{SOCIAL_READ_WINDOW, SOCIAL_REPORT_WINDOW};
use crate::domain::tools::ToolDefinition;

fn facility_property() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        "facility".to_string(),
        json!({ "type": "string", "description": "Stabilimento (filtro esatto)" }),
    );
    map
}

pub fn generate_social_report_tool() -> ToolDefinition {
    let (start, end) = SOCIAL_REPORT_WINDOW;
    ToolDefinition::new(
        "generate_social_report",
        "(Sociale) Report KPI sociali per stabilimento sul periodo selezionato, con score e raccomandazioni.",
        object_schema(
            vec![window_properties(start, end), facility_property(), report_properties(1)],
            &[],
        ),
        report_returns(),
    )
}

pub fn social_kpi_snapshot_tool() -> ToolDefinition {
    let mut params = facility_property();
    params.insert(
        "window_n".to_string(),
        json!({ "type": "integer", "minimum": 1, "maximum": 48 }),
    );
    params.insert(
        "decimals".to_string(),
        json!({ "type": "integer", "minimum": 0, "maximum": 6, "default": 1 }),
    );
    ToolDefinition::new(
        "social_kpi_snapshot",
        "(Sociale) Snapshot dei KPI sociali sull'ultimo periodo registrato, con trend sugli ultimi N periodi.",
        object_schema(vec![params], &[]),
        json!({ "type": "object" }),
    )
}

pub fn read_social_data_tool() -> ToolDefinition {
    let (start, end) = SOCIAL_READ_WINDOW;
    ToolDefinition::new(
        "read_social_data",
        "(Sociale) Legge i KPI sociali salvati, per stabilimento e periodo.",
        object_schema(vec![window_properties(start, end), facility_property()], &[]),
        json!({
            "type": "object",
            "properties": {
                "source": { "type": "string" },
                "count": { "type": "integer" },
                "records": { "type": "array" }
            }
        }),
    )
}

pub fn upsert_social_kpis_tool() -> ToolDefinition {
    let mut props = Map::new();
    props.insert("facility".to_string(), json!({ "type": "string" }));
    props.insert(
        "period_start".to_string(),
        json!({ "type": "string", "description": "Inizio periodo (es. 2025-01-01)" }),
    );
    props.insert(
        "period_end".to_string(),
        json!({ "type": "string", "description": "Fine periodo (es. 2025-03-31)" }),
    );
    for kpi in SOCIAL_KPIS {
        let kind = if *kpi == "community_projects_count" {
            "integer"
        } else {
            "number"
        };
        props.insert(kpi.to_string(), json!({ "type": kind }));
    }
    props.insert(
        "satisfaction_scale".to_string(),
        json!({ "type": "integer", "enum": [10, 100], "default": 100 }),
    );
    ToolDefinition::new(
        "upsert_social_kpis",
        "(Sociale) Registra o aggiorna i KPI sociali di uno stabilimento per un periodo.",
        object_schema(vec![props], &["facility", "period_start", "period_end"]),
        json!({
            "type": "object",
            "properties": {
                "stored": { "type": "boolean" },
                "path": { "type": "string" },
                "count": { "type": "integer" },
                "last": { "type": "object" }
            }
        }),
    )
}

pub fn social_requirements_tool() -> ToolDefinition {
    ToolDefinition::without_parameters(
        "social_requirements",
        "(Sociale) Elenco dei campi da chiedere all'utente prima del report sociale.",
        json!({
            "type": "object",
            "properties": {
                "required_fields": { "type": "array", "items": { "type": "string" } },
                "notes": { "type": "string" }
            }
        }),
    )
}

pub fn social_tools() -> Vec<ToolDefinition> {
    vec![
        generate_social_report_tool(),
        social_kpi_snapshot_tool(),
        read_social_data_tool(),
        upsert_social_kpis_tool(),
        social_requirements_tool(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_requires_identity_fields_only() {
        let tool = upsert_social_kpis_tool();
        assert_eq!(
            tool.parameters_schema()["required"],
            json!(["facility", "period_start", "period_end"])
        );
        assert_eq!(
            tool.parameters_schema()["properties"]["community_projects_count"]["type"],
            "integer"
        );
        assert_eq!(
            tool.parameters_schema()["properties"]["satisfaction_scale"]["enum"],
            json!([10, 100])
        );
    }

    #[test]
    fn social_report_defaults_to_latest_period() {
        let tool = generate_social_report_tool();
        assert_eq!(tool.parameters_schema()["properties"]["idx_end"]["default"], 0);
        assert!(tool.parameters_schema()["properties"]["facility"].is_object());
    }
}
