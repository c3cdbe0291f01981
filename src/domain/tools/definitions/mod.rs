//! Tool Definitions - JSON schemas of every advisor tool, grouped by agent mode.
//!
//! - [`environment`] - sensor report, live snapshot and raw reads
//! - [`social`] - social report, snapshot, reads, upsert and requirements
//! - [`dss`] - AHP decision report
//! - [`cross_cutting`] - targets query, available in every mode

pub mod cross_cutting;
pub mod dss;
pub mod environment;
pub mod social;

pub use cross_cutting::*;
pub use dss::*;
pub use environment::*;
pub use social::*;

use serde_json::{json, Map, Value};

/// Properties shared by every windowed tool, with the tool's default bounds.
pub(crate) fn window_properties(default_start: usize, default_end: usize) -> Map<String, Value> {
    let schema = json!({
        "by": {
            "type": "string",
            "enum": ["index", "date"],
            "default": "index",
            "description": "Selezione per indice (0 = record più recente) o per data"
        },
        "idx_start": { "type": "integer", "minimum": 0, "default": default_start },
        "idx_end": { "type": "integer", "minimum": 0, "default": default_end },
        "date_start": {
            "type": "string",
            "description": "ISO-8601, YYYY-MM-DD o YYYY-MM (incluso)"
        },
        "date_end": {
            "type": "string",
            "description": "ISO-8601, YYYY-MM-DD o YYYY-MM (incluso)"
        }
    });
    match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// `output_mode` and `decimals` properties of report tools.
pub(crate) fn report_properties(default_decimals: u32) -> Map<String, Value> {
    let schema = json!({
        "output_mode": {
            "type": "string",
            "enum": ["text", "json"],
            "default": "text",
            "description": "text = markdown, json = report strutturato"
        },
        "decimals": { "type": "integer", "minimum": 0, "maximum": 6, "default": default_decimals }
    });
    match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Object schema from merged property maps.
pub(crate) fn object_schema(parts: Vec<Map<String, Value>>, required: &[&str]) -> Value {
    let mut properties = Map::new();
    for part in parts {
        properties.extend(part);
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Returns schema of a markdown-or-json report.
pub(crate) fn report_returns() -> Value {
    json!({
        "oneOf": [
            { "type": "string", "description": "Report markdown" },
            { "type": "object", "description": "Report strutturato" }
        ]
    })
}
