use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, statuses};
use crate::models::entity::{status_in, Entity, EntityKind};
use crate::models::field_utils::{resolve_date, resolve_id, resolve_list, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub permit_id: Option<RecordId>,
    pub inspection_type: Option<String>,
    pub status: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub inspector: Option<String>,
    /// Photo attachments, kept as the backend sent them
    pub photos: Vec<Value>,
    pub deficiencies: Vec<Value>,
    #[serde(skip)]
    pub raw: Value,
}

impl Inspection {
    pub fn is_scheduled(&self) -> bool {
        status_in(self.status.as_deref(), statuses::SCHEDULED)
    }

    pub fn has_deficiencies(&self) -> bool {
        !self.deficiencies.is_empty()
    }
}

impl Entity for Inspection {
    const KIND: EntityKind = EntityKind::Inspection;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Inspection {
            id: resolve_id(value, aliases::INSPECTION_ID),
            project_id: resolve_id(value, aliases::PROJECT_REF),
            permit_id: resolve_id(value, aliases::PERMIT_REF),
            inspection_type: resolve_str(value, aliases::INSPECTION_TYPE),
            status: resolve_str(value, aliases::STATUS),
            inspection_date: resolve_date(value, aliases::INSPECTION_DATE),
            inspector: resolve_str(value, aliases::INSPECTOR),
            photos: resolve_list(value, aliases::PHOTOS),
            deficiencies: resolve_list(value, aliases::DEFICIENCIES),
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
