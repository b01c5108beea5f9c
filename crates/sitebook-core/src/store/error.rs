use crate::api::ApiError;
use crate::models::{EntityKind, RecordId};

/// Errors surfaced by the cache layer.
///
/// Cloneable so a single failed fetch can be handed to every reader that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Transport failure or non-2xx response. Retryable.
    #[error("Failed to load {kind} records: {message}")]
    Fetch {
        kind: EntityKind,
        status: Option<u16>,
        message: String,
    },

    /// A by-id lookup came back 404
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },

    /// The owning scope was torn down
    #[error("{kind} store is closed")]
    Closed { kind: EntityKind },
}

impl CacheError {
    pub fn from_api(kind: EntityKind, err: ApiError) -> Self {
        CacheError::Fetch {
            kind,
            status: err.status(),
            message: err.to_string(),
        }
    }

    /// Map a by-id call failure, keeping 404 distinguishable
    pub fn from_lookup(kind: EntityKind, id: &RecordId, err: ApiError) -> Self {
        if err.is_not_found() {
            CacheError::NotFound {
                kind,
                id: id.clone(),
            }
        } else {
            Self::from_api(kind, err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, CacheError::Fetch { .. })
    }
}
