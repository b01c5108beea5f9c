use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, statuses};
use crate::models::entity::{status_in, Entity, EntityKind};
use crate::models::field_utils::{resolve_amount, resolve_date, resolve_id, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: Option<RecordId>,
    pub client_id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub total_amount: f64,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(skip)]
    pub raw: Value,
}

impl Invoice {
    /// Neither paid nor voided
    pub fn is_open(&self) -> bool {
        !status_in(self.status.as_deref(), statuses::SETTLED_INVOICE)
    }
}

impl Entity for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Invoice {
            id: resolve_id(value, aliases::INVOICE_ID),
            client_id: resolve_id(value, aliases::FINANCE_CLIENT_REF),
            project_id: resolve_id(value, aliases::FINANCE_PROJECT_REF),
            total_amount: resolve_amount(value, aliases::INVOICE_TOTAL),
            status: resolve_str(value, aliases::STATUS),
            due_date: resolve_date(value, aliases::DUE_DATE),
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
