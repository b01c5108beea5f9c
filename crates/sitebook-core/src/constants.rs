//! Application-wide constants
//!
//! Centralized location for field aliases, labels and configuration values
//! that are used across multiple modules.

/// Default backend base URL
pub const API_BASE_URL: &str = "http://localhost:8000/api";

/// How long a fetched collection is served from cache before it is refetched
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Per-request timeout for the HTTP adapter
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Fallback labels for broken joins and empty fields
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const NOT_SET_LABEL: &str = "Not set";

/// Days ahead counted as "upcoming" for inspections and site visits
pub const UPCOMING_WINDOW_DAYS: u64 = 14;

/// Field-name aliases, in priority order.
///
/// The backend never settled on one spelling per key, so every lookup tries
/// each alias in turn and takes the first non-empty value.
pub mod aliases {
    // Primary identifiers
    pub const CLIENT_ID: &[&str] = &["Client ID", "ID", "client_id", "id"];
    pub const PROJECT_ID: &[&str] = &["Project ID", "project_id", "id"];
    pub const PERMIT_ID: &[&str] = &["Permit ID", "permit_id", "business_id", "id"];
    pub const INSPECTION_ID: &[&str] = &["Inspection ID", "inspection_id", "business_id", "id"];
    pub const INVOICE_ID: &[&str] = &["invoice_id", "Invoice ID", "id"];
    pub const PAYMENT_ID: &[&str] = &["payment_id", "Payment ID", "id"];
    pub const SITE_VISIT_ID: &[&str] = &["Visit ID", "visit_id", "id"];

    // Foreign keys
    pub const CLIENT_REF: &[&str] = &["Client ID", "client_id"];
    pub const FINANCE_CLIENT_REF: &[&str] = &["client_id", "Client ID"];
    pub const PROJECT_REF: &[&str] = &["Project ID", "project_id"];
    pub const FINANCE_PROJECT_REF: &[&str] = &["project_id", "Project ID"];
    pub const PERMIT_REF: &[&str] = &["Permit ID", "permit_id"];

    // Display and descriptive fields
    pub const CLIENT_NAME: &[&str] = &["Full Name", "Client Name", "name", "full_name"];
    pub const EMAIL: &[&str] = &["Email", "email"];
    pub const PHONE: &[&str] = &["Phone", "phone"];
    pub const ADDRESS: &[&str] = &["Address", "address", "Property Address"];
    pub const PROJECT_NAME: &[&str] = &["Project Name", "project_name", "name"];
    pub const STATUS: &[&str] = &["Status", "status"];
    pub const PERMIT_TYPE: &[&str] = &["Permit Type", "permit_type"];
    pub const PERMIT_NUMBER: &[&str] = &["Permit Number", "permit_number"];
    pub const SUBMISSION_DATE: &[&str] = &["Submission Date", "submission_date", "submitted_at"];
    pub const INSPECTION_TYPE: &[&str] = &["Inspection Type", "inspection_type"];
    pub const INSPECTION_DATE: &[&str] = &["Inspection Date", "inspection_date", "scheduled_date"];
    pub const INSPECTOR: &[&str] = &["Inspector", "inspector"];
    pub const PHOTOS: &[&str] = &["Photos", "photos"];
    pub const DEFICIENCIES: &[&str] = &["Deficiencies", "deficiencies"];
    pub const VISIT_DATE: &[&str] = &["Visit Date", "visit_date", "scheduled_date"];
    pub const NOTES: &[&str] = &["Notes", "notes"];
    pub const DUE_DATE: &[&str] = &["due_date", "Due Date"];
    pub const PAYMENT_DATE: &[&str] = &["payment_date", "Payment Date"];
    pub const PAYMENT_METHOD: &[&str] = &["payment_method", "Payment Method"];

    // Amounts
    pub const INVOICE_TOTAL: &[&str] = &["total_amount", "Total Amount"];
    pub const PAYMENT_AMOUNT: &[&str] = &["amount", "Amount"];
    pub const ESTIMATED_COST: &[&str] = &["Estimated Cost", "estimated_cost"];
    pub const ACTUAL_COST: &[&str] = &["Actual Cost", "actual_cost"];
}

/// Status values the dashboard counts against (compared case-insensitively)
pub mod statuses {
    pub const ACTIVE_PROJECT: &[&str] = &["active", "in progress", "in_progress"];
    pub const PENDING_PERMIT: &[&str] = &["pending", "submitted", "under review", "in review"];
    pub const SCHEDULED: &[&str] = &["scheduled", "pending"];
    pub const SETTLED_INVOICE: &[&str] = &["paid", "void", "cancelled"];
}
