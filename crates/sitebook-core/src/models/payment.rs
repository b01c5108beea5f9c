use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::constants::aliases;
use crate::models::entity::{Entity, EntityKind};
use crate::models::field_utils::{resolve_amount, resolve_date, resolve_id, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: Option<RecordId>,
    pub client_id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub amount: f64,
    pub status: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl Entity for Payment {
    const KIND: EntityKind = EntityKind::Payment;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Payment {
            id: resolve_id(value, aliases::PAYMENT_ID),
            client_id: resolve_id(value, aliases::FINANCE_CLIENT_REF),
            project_id: resolve_id(value, aliases::FINANCE_PROJECT_REF),
            amount: resolve_amount(value, aliases::PAYMENT_AMOUNT),
            status: resolve_str(value, aliases::STATUS),
            payment_date: resolve_date(value, aliases::PAYMENT_DATE),
            payment_method: resolve_str(value, aliases::PAYMENT_METHOD),
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
