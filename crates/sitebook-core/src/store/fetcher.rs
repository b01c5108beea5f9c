use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::EntityApi;
use crate::models::{Entity, EntityKind, RecordId};
use crate::store::CacheError;

/// The backend answered with something that is neither a bare array nor an
/// `{ "items": [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed {kind} response: expected an array or an items envelope, got {found}")]
pub struct MalformedResponse {
    pub kind: EntityKind,
    pub found: &'static str,
}

/// Split a collection payload into its records.
pub fn split_payload(kind: EntityKind, payload: Value) -> Result<Vec<Value>, MalformedResponse> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => match envelope.remove("items") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(MalformedResponse {
                kind,
                found: "object without an items array",
            }),
        },
        Value::Null => Err(MalformedResponse { kind, found: "null" }),
        Value::Bool(_) => Err(MalformedResponse { kind, found: "boolean" }),
        Value::Number(_) => Err(MalformedResponse { kind, found: "number" }),
        Value::String(_) => Err(MalformedResponse { kind, found: "string" }),
    }
}

/// Like `split_payload`, but an unrecognized shape degrades to an empty
/// collection so one bad response cannot break joins against healthy ones.
pub fn normalize_payload(kind: EntityKind, payload: Value) -> Vec<Value> {
    split_payload(kind, payload).unwrap_or_else(|err| {
        warn!("{}; treating as empty", err);
        Vec::new()
    })
}

/// Thin adapter over the REST client: one call per entity kind.
#[derive(Clone)]
pub struct EntityFetcher {
    api: Arc<dyn EntityApi>,
}

impl EntityFetcher {
    pub fn new(api: Arc<dyn EntityApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn EntityApi> {
        &self.api
    }

    /// One collection call, through the client's named method for `kind`
    pub async fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Value>, CacheError> {
        let payload = match kind {
            EntityKind::Client => self.api.get_clients().await,
            EntityKind::Project => self.api.get_projects().await,
            EntityKind::Permit => self.api.get_permits().await,
            EntityKind::Inspection => self.api.get_inspections().await,
            EntityKind::Invoice => self.api.get_invoices().await,
            EntityKind::Payment => self.api.get_payments().await,
            EntityKind::SiteVisit => self.api.get_site_visits().await,
        }
        .map_err(|err| CacheError::from_api(kind, err))?;
        Ok(normalize_payload(kind, payload))
    }

    /// Fetch and map into typed records. Entries that are not JSON objects
    /// are dropped.
    pub async fn fetch_all<T: Entity>(&self) -> Result<Vec<T>, CacheError> {
        let raw = self.fetch_collection(T::KIND).await?;
        let total = raw.len();
        let records: Vec<T> = raw.iter().filter_map(T::from_value).collect();

        if records.len() < total {
            debug!(
                "{}: dropped {} non-object entries",
                T::KIND,
                total - records.len()
            );
        }
        Ok(records)
    }

    pub async fn fetch_one(&self, kind: EntityKind, id: &RecordId) -> Result<Value, CacheError> {
        self.api
            .get(kind, id)
            .await
            .map_err(|err| CacheError::from_lookup(kind, id, err))
    }
}
