pub mod aggregate;
pub mod app_data;
pub mod cache_store;
pub mod error;
pub mod fetcher;
pub mod join;
pub mod views;

pub use aggregate::{
    count_where, outstanding_balance, sum_amount, sum_by, sum_where, ClientFinancials,
    DashboardStats, ProjectFinancials,
};
pub use app_data::{AppData, Collections};
pub use cache_store::{CacheState, CacheStore, Predicate};
pub use error::CacheError;
pub use fetcher::{normalize_payload, split_payload, EntityFetcher, MalformedResponse};
pub use join::{find_duplicate_ids, join, join_many, join_one, JoinIndex};
pub use views::{
    client_financial_rows, inspection_rows, permit_rows, project_rows, ClientFinancialsRow,
    InspectionRow, PermitRow, ProjectRow,
};
