//! Outbound REST collaborator.
//!
//! `EntityApi` is the seam between the cache layer and the backend: one
//! collection call per entity kind plus by-id reads and mutations. The
//! reqwest-backed `HttpApi` is the production implementation; tests inject
//! their own.

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{EntityKind, RecordId};

pub use http::HttpApi;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. The message prefix is relied on by callers that
    /// only see the rendered error.
    #[error("API error: {status}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => ApiError::Transport(err.to_string()),
        }
    }
}

/// REST client contract.
///
/// Collection calls return the payload untouched: a bare array, an
/// `{ "items": [...] }` envelope, or whatever else the backend sent. Shape
/// normalization belongs to the fetcher.
///
/// The fetcher reads collections through the named `get_*` methods, which
/// default to `list`. Implementations may override either.
#[async_trait]
pub trait EntityApi: Send + Sync {
    async fn list(&self, kind: EntityKind) -> Result<Value, ApiError>;

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Value, ApiError>;

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Value, ApiError>;

    /// Partial update; returns the updated record
    async fn update(&self, kind: EntityKind, id: &RecordId, patch: Value)
        -> Result<Value, ApiError>;

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError>;

    async fn get_clients(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Client).await
    }

    async fn get_projects(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Project).await
    }

    async fn get_permits(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Permit).await
    }

    async fn get_inspections(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Inspection).await
    }

    async fn get_invoices(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Invoice).await
    }

    async fn get_payments(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::Payment).await
    }

    async fn get_site_visits(&self) -> Result<Value, ApiError> {
        self.list(EntityKind::SiteVisit).await
    }
}
