use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::constants::aliases;
use crate::models::field_utils::RecordId;

/// The backend collections the console reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Client,
    Project,
    Permit,
    Inspection,
    Invoice,
    Payment,
    SiteVisit,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Client,
        EntityKind::Project,
        EntityKind::Permit,
        EntityKind::Inspection,
        EntityKind::Invoice,
        EntityKind::Payment,
        EntityKind::SiteVisit,
    ];

    /// REST collection path segment
    pub fn path(&self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Project => "projects",
            Self::Permit => "permits",
            Self::Inspection => "inspections",
            Self::Invoice => "invoices",
            Self::Payment => "payments",
            Self::SiteVisit => "site-visits",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Project => "project",
            Self::Permit => "permit",
            Self::Inspection => "inspection",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::SiteVisit => "site visit",
        }
    }

    /// Primary identifier aliases, in priority order
    pub fn id_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Client => aliases::CLIENT_ID,
            Self::Project => aliases::PROJECT_ID,
            Self::Permit => aliases::PERMIT_ID,
            Self::Inspection => aliases::INSPECTION_ID,
            Self::Invoice => aliases::INVOICE_ID,
            Self::Payment => aliases::PAYMENT_ID,
            Self::SiteVisit => aliases::SITE_VISIT_ID,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed, canonical record built once from a raw backend record.
///
/// Implementors resolve every aliased field at construction time; the raw
/// JSON is kept alongside for fields the typed shape does not model.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Build from a raw record. Returns None when the record is not an object.
    fn from_value(value: &Value) -> Option<Self>;

    /// Canonical identifier, if the record carried one under any alias
    fn id(&self) -> Option<&RecordId>;

    fn status(&self) -> Option<&str> {
        None
    }

    fn raw(&self) -> &Value;
}

/// Case-insensitive status membership test. A missing status never matches.
pub fn status_in(status: Option<&str>, candidates: &[&str]) -> bool {
    match status {
        Some(s) => {
            let s = s.trim();
            candidates.iter().any(|c| c.eq_ignore_ascii_case(s))
        }
        None => false,
    }
}
