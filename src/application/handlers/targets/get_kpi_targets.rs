//! GetKpiTargetsHandler - query over the targets file.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::application::handlers::report_settings::to_json;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::kpi::TargetSection;
use crate::domain::tools::GetKpiTargetsArgs;
use crate::ports::TargetStore;

/// Sections a targets query can address.
pub const TARGET_SECTIONS: [&str; 2] = ["environment", "social"];

pub struct GetKpiTargetsHandler {
    targets: Arc<dyn TargetStore>,
}

impl GetKpiTargetsHandler {
    pub fn new(targets: Arc<dyn TargetStore>) -> Self {
        Self { targets }
    }

    /// Returns the whole file, one section, or the requested metrics of a
    /// section. Metrics without a section are ignored.
    pub async fn handle(&self, args: GetKpiTargetsArgs) -> Result<Value, DomainError> {
        let targets = self.targets.load().await?;
        let source = self.targets.source();

        let Some(name) = args.section else {
            let mut out = Map::new();
            out.insert("source".into(), Value::String(source));
            out.insert("targets".into(), to_json(&targets)?);
            return Ok(Value::Object(out));
        };

        let section = match name.as_str() {
            "environment" => &targets.environment,
            "social" => &targets.social,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::SectionNotFound,
                    format!("Sezione '{}' non trovata nei target.", name),
                )
                .with_detail("available", TARGET_SECTIONS.join(", ")))
            }
        };

        let mut out = Map::new();
        out.insert("source".into(), Value::String(source));
        out.insert("section".into(), Value::String(name.clone()));
        match args.metrics {
            Some(metrics) => {
                let (found, missing) = Self::filter(section, &metrics)?;
                out.insert("targets".into(), Value::Object(found));
                if !missing.is_empty() {
                    let available: Vec<&String> = section.metrics.keys().collect();
                    out.insert("missing_metrics".into(), to_json(&missing)?);
                    out.insert("available_metrics".into(), to_json(&available)?);
                }
            }
            None => {
                out.insert("targets".into(), to_json(section)?);
            }
        }
        Ok(Value::Object(out))
    }

    fn filter(
        section: &TargetSection,
        metrics: &[String],
    ) -> Result<(Map<String, Value>, Vec<String>), DomainError> {
        let mut found = Map::new();
        let mut missing = Vec::new();
        for metric in metrics {
            match section.get(metric) {
                Some(target) => {
                    found.insert(metric.clone(), to_json(target)?);
                }
                None => missing.push(metric.clone()),
            }
        }
        Ok((found, missing))
    }
}
