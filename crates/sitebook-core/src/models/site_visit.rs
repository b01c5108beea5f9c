use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, statuses};
use crate::models::entity::{status_in, Entity, EntityKind};
use crate::models::field_utils::{resolve_date, resolve_id, resolve_str, RecordId};

/// A scheduled or completed visit to a project site
#[derive(Debug, Clone, Serialize)]
pub struct SiteVisit {
    pub id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub visit_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl SiteVisit {
    pub fn is_scheduled(&self) -> bool {
        status_in(self.status.as_deref(), statuses::SCHEDULED)
    }
}

impl Entity for SiteVisit {
    const KIND: EntityKind = EntityKind::SiteVisit;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(SiteVisit {
            id: resolve_id(value, aliases::SITE_VISIT_ID),
            project_id: resolve_id(value, aliases::PROJECT_REF),
            visit_date: resolve_date(value, aliases::VISIT_DATE),
            status: resolve_str(value, aliases::STATUS),
            notes: resolve_str(value, aliases::NOTES),
            raw: value.clone(),
        })
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let visit = SiteVisit::from_value(&json!({
            "visit_id": 9,
            "Project ID": "P1",
            "Visit Date": "2024-08-15",
            "status": "scheduled",
        }))
        .unwrap();

        assert_eq!(visit.id, Some(RecordId::from("9")));
        assert_eq!(visit.project_id, Some(RecordId::from("P1")));
        assert!(visit.is_scheduled());
    }
}
