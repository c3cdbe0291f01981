//! DSS tool - AHP decision report over environmental, social and
//! financial categories.

use serde_json::{json, Map, Value};

use super::{object_schema, report_properties, report_returns, window_properties};
use crate::domain::analysis::FINANCIAL_INDICATORS;
use crate::domain::tools::request::DSS_WINDOW;
use crate::domain::tools::ToolDefinition;

fn matrix_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "array", "items": { "type": "number", "exclusiveMinimum": 0 } },
        "description": description
    })
}

pub fn generate_dss_report_tool() -> ToolDefinition {
    let (start, end) = DSS_WINDOW;
    let financial_keys: Map<String, Value> = FINANCIAL_INDICATORS
        .iter()
        .map(|(key, label, default)| {
            (
                key.to_string(),
                json!({ "type": "number", "minimum": 0, "maximum": 1, "default": default, "description": label }),
            )
        })
        .collect();

    let mut options = Map::new();
    options.insert(
        "facility".to_string(),
        json!({ "type": "string", "description": "Stabilimento per i KPI sociali" }),
    );
    options.insert(
        "cat_matrix".to_string(),
        matrix_schema("Confronti a coppie 3×3 tra categorie [ENV, SOC, FIN]"),
    );
    options.insert(
        "env_matrix".to_string(),
        matrix_schema("Confronti tra indicatori ambientali con soglie"),
    );
    options.insert(
        "social_matrix".to_string(),
        matrix_schema("Confronti tra indicatori sociali con soglie"),
    );
    options.insert(
        "financial_matrix".to_string(),
        matrix_schema("Confronti 3×3 tra indicatori finanziari"),
    );
    options.insert(
        "financial_mock_values".to_string(),
        json!({ "type": "object", "properties": financial_keys, "additionalProperties": false }),
    );
    options.insert(
        "status_mapping".to_string(),
        json!({
            "oneOf": [
                { "type": "string", "enum": ["standard", "snapshot"] },
                {
                    "type": "object",
                    "required": ["green", "yellow", "red"],
                    "properties": {
                        "green": { "type": "number" },
                        "yellow": { "type": "number" },
                        "red": { "type": "number" },
                        "not_available": { "type": ["number", "null"] }
                    }
                }
            ],
            "description": "Normalizzazione stato → 0–1 (standard: 1.0/0.8/0.5/0.0)"
        }),
    );
    options.insert("co2_field".to_string(), json!({ "type": "string" }));

    ToolDefinition::new(
        "generate_dss_report",
        "(DSS) Report decisionale AHP: pesi e CR per categoria e indicatori, score per categoria, score finale, ranking e contributi.",
        object_schema(vec![window_properties(start, end), report_properties(2), options], &[]),
        report_returns(),
    )
}

pub fn dss_tools() -> Vec<ToolDefinition> {
    vec![generate_dss_report_tool()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dss_defaults() {
        let tool = generate_dss_report_tool();
        let props = &tool.parameters_schema()["properties"];
        assert_eq!(props["idx_end"]["default"], 200);
        assert_eq!(props["decimals"]["default"], 2);
        assert_eq!(
            props["financial_mock_values"]["properties"]["energy_efficiency_index"]["default"],
            0.7
        );
    }
}
