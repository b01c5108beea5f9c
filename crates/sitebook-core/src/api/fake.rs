//! In-memory `EntityApi` for tests: canned payloads, call counters, and a
//! gate that holds collection calls in flight until released.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

use crate::api::{ApiError, EntityApi};
use crate::models::{EntityKind, RecordId};

#[derive(Default)]
pub(crate) struct FakeApi {
    collections: Mutex<HashMap<EntityKind, Result<Value, u16>>>,
    records: Mutex<HashMap<(EntityKind, String), Value>>,
    list_calls: Mutex<HashMap<EntityKind, usize>>,
    mutations: Mutex<Vec<(EntityKind, String)>>,
    hold: AtomicBool,
    gate: Notify,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_collection(&self, kind: EntityKind, payload: Value) {
        self.collections.lock().insert(kind, Ok(payload));
    }

    pub(crate) fn fail_collection(&self, kind: EntityKind, status: u16) {
        self.collections.lock().insert(kind, Err(status));
    }

    pub(crate) fn set_record(&self, kind: EntityKind, id: &str, record: Value) {
        self.records.lock().insert((kind, id.to_string()), record);
    }

    pub(crate) fn list_calls(&self, kind: EntityKind) -> usize {
        self.list_calls.lock().get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn mutations(&self) -> Vec<(EntityKind, String)> {
        self.mutations.lock().clone()
    }

    /// Make every subsequent `list` wait for `release`
    pub(crate) fn hold_lists(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    /// Let one held `list` call complete
    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl EntityApi for FakeApi {
    async fn list(&self, kind: EntityKind) -> Result<Value, ApiError> {
        *self.list_calls.lock().entry(kind).or_insert(0) += 1;

        if self.hold.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }

        let outcome = self.collections.lock().get(&kind).cloned();
        match outcome {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(status)) => Err(ApiError::Status {
                status,
                body: String::new(),
            }),
            None => Ok(Value::Array(Vec::new())),
        }
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Value, ApiError> {
        self.records
            .lock()
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })
    }

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Value, ApiError> {
        self.mutations.lock().push((kind, "create".to_string()));
        Ok(body)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        patch: Value,
    ) -> Result<Value, ApiError> {
        self.mutations.lock().push((kind, format!("update {}", id)));

        let mut records = self.records.lock();
        let record = records
            .get_mut(&(kind, id.to_string()))
            .ok_or(ApiError::Status {
                status: 404,
                body: String::new(),
            })?;
        if let (Some(target), Some(changes)) = (record.as_object_mut(), patch.as_object()) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError> {
        self.mutations.lock().push((kind, format!("delete {}", id)));
        self.records.lock().remove(&(kind, id.to_string()));
        Ok(())
    }
}
