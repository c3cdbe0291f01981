//! Cross-cutting tools, available in every agent mode.

use serde_json::json;

use crate::domain::tools::ToolDefinition;

pub fn get_kpi_targets_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_kpi_targets",
        "Legge i target KPI (creati con i valori di default se mancanti). Filtro opzionale per sezione ('environment'|'social') e metriche.",
        json!({
            "type": "object",
            "properties": {
                "section": { "type": "string", "enum": ["environment", "social"] },
                "metrics": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Metriche da filtrare; valido solo con section"
                }
            }
        }),
        json!({
            "type": "object",
            "properties": {
                "source": { "type": "string" },
                "targets": { "type": "object" },
                "missing_metrics": { "type": "array", "items": { "type": "string" } },
                "available_metrics": { "type": "array", "items": { "type": "string" } }
            }
        }),
    )
}

pub fn cross_cutting_tools() -> Vec<ToolDefinition> {
    vec![get_kpi_targets_tool()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_tool_limits_sections() {
        let tool = get_kpi_targets_tool();
        assert_eq!(
            tool.parameters_schema()["properties"]["section"]["enum"],
            json!(["environment", "social"])
        );
        assert!(tool.parameters_schema().get("required").is_none());
    }
}
