use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, statuses, UNKNOWN_LABEL};
use crate::models::entity::{status_in, Entity, EntityKind};
use crate::models::field_utils::{resolve_amount, resolve_id, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: Option<RecordId>,
    pub client_id: Option<RecordId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    #[serde(skip)]
    pub raw: Value,
}

impl Project {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.address.as_deref())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn is_active(&self) -> bool {
        status_in(self.status.as_deref(), statuses::ACTIVE_PROJECT)
    }

    /// Actual minus estimated cost; positive means over budget
    pub fn cost_variance(&self) -> f64 {
        self.actual_cost - self.estimated_cost
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Project {
            id: resolve_id(value, aliases::PROJECT_ID),
            client_id: resolve_id(value, aliases::CLIENT_REF),
            name: resolve_str(value, aliases::PROJECT_NAME),
            status: resolve_str(value, aliases::STATUS),
            address: resolve_str(value, aliases::ADDRESS),
            estimated_cost: resolve_amount(value, aliases::ESTIMATED_COST),
            actual_cost: resolve_amount(value, aliases::ACTUAL_COST),
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
