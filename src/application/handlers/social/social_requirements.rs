//! SocialRequirementsHandler - the fields to ask for before a social report.

use serde::Serialize;

use crate::domain::kpi::catalog::SOCIAL_REQUIRED_FIELDS;

pub const SOCIAL_REQUIREMENTS_NOTE: &str =
    "Fornisci numeri; se mancano resteranno INDEFINITI nel report (esclusi dallo score).";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialRequirements {
    pub required_fields: Vec<&'static str>,
    pub notes: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct SocialRequirementsHandler;

impl SocialRequirementsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self) -> SocialRequirements {
        SocialRequirements {
            required_fields: SOCIAL_REQUIRED_FIELDS.to_vec(),
            notes: SOCIAL_REQUIREMENTS_NOTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_identity_and_kpi_fields() {
        let requirements = SocialRequirementsHandler::new().handle();
        assert_eq!(&requirements.required_fields[..3], &["facility", "period_start", "period_end"]);
        assert!(requirements.required_fields.contains(&"satisfaction_scale"));
        assert_eq!(requirements.required_fields.len(), 14);
        assert!(requirements.notes.contains("INDEFINITI"));
    }
}
