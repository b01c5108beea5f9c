//! Relational cache and view-aggregation layer for a permitting console.
//!
//! The backend serves each entity as an independent, denormalized
//! collection. This crate caches those collections per entity kind,
//! rebuilds cross-entity relationships at read time, and derives the
//! financial and dashboard figures the console shows.

pub mod api;
pub mod config;
pub mod constants;
pub mod models;
pub mod store;
pub mod tracing_setup;

pub use api::{ApiError, EntityApi, HttpApi};
pub use config::CoreConfig;
pub use models::{Entity, EntityKind, RecordId};
pub use store::{AppData, CacheError, CacheState, CacheStore, Collections};
