use serde::Serialize;
use serde_json::Value;

use crate::constants::{aliases, UNKNOWN_LABEL};
use crate::models::entity::{Entity, EntityKind};
use crate::models::field_utils::{resolve_id, resolve_str, RecordId};

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl Client {
    /// Name shown in tables, falling back to "Unknown"
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Client;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;

        Some(Client {
            id: resolve_id(value, aliases::CLIENT_ID),
            name: resolve_str(value, aliases::CLIENT_NAME),
            email: resolve_str(value, aliases::EMAIL),
            phone: resolve_str(value, aliases::PHONE),
            address: resolve_str(value, aliases::ADDRESS),
            raw: value.clone(),
        })
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}
