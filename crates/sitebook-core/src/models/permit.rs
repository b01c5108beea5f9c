use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, statuses};
use crate::models::entity::{status_in, Entity, EntityKind};
use crate::models::field_utils::{resolve_date, resolve_id, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Permit {
    pub id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub permit_type: Option<String>,
    pub permit_number: Option<String>,
    pub status: Option<String>,
    pub submission_date: Option<NaiveDate>,
    #[serde(skip)]
    pub raw: Value,
}

impl Permit {
    /// Submitted but not yet decided
    pub fn is_pending(&self) -> bool {
        status_in(self.status.as_deref(), statuses::PENDING_PERMIT)
    }
}

impl Entity for Permit {
    const KIND: EntityKind = EntityKind::Permit;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Permit {
            id: resolve_id(value, aliases::PERMIT_ID),
            project_id: resolve_id(value, aliases::PROJECT_REF),
            permit_type: resolve_str(value, aliases::PERMIT_TYPE),
            permit_number: resolve_str(value, aliases::PERMIT_NUMBER),
            status: resolve_str(value, aliases::STATUS),
            submission_date: resolve_date(value, aliases::SUBMISSION_DATE),
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
    fn test_from_value_resolves_project_reference() {
        let permit = Permit::from_value(&json!({
            "business_id": "X1",
            "project_id": "P1",
            "Status": "Submitted",
            "Submission Date": "2024-05-02",
        }))
        .unwrap();

        assert_eq!(permit.id, Some(RecordId::from("X1")));
        assert_eq!(permit.project_id, Some(RecordId::from("P1")));
        assert!(permit.is_pending());
        assert_eq!(permit.submission_date, NaiveDate::from_ymd_opt(2024, 5, 2));
    }

    #[test]
    fn test_permit_id_alias_order() {
        let permit = Permit::from_value(&json!({
            "Permit ID": "X1",
            "business_id": "B-77",
        }))
        .unwrap();
        assert_eq!(permit.id, Some(RecordId::from("X1")));
        assert!(permit.project_id.is_none());
    }
}
