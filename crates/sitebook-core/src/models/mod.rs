pub mod client;
pub mod entity;
pub mod field_utils;
pub mod inspection;
pub mod invoice;
pub mod payment;
pub mod permit;
pub mod project;
pub mod site_visit;

pub use client::Client;
pub use entity::{status_in, Entity, EntityKind};
pub use field_utils::{resolve_id, RecordId};
pub use inspection::Inspection;
pub use invoice::Invoice;
pub use payment::Payment;
pub use permit::Permit;
pub use project::Project;
pub use site_visit::SiteVisit;
