//! Derived figures over cached collections: sums, counts, balances.
//!
//! Everything here is pure and recomputed on every call.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::constants::UPCOMING_WINDOW_DAYS;
use crate::models::field_utils::coerce_amount;
use crate::models::{Entity, Invoice, Payment, Project, RecordId};
use crate::store::app_data::Collections;
use crate::store::join::join_many;

/// Sum one field over raw records. Missing, null and non-numeric values
/// count as zero.
pub fn sum_amount(records: &[Value], field: &str) -> f64 {
    records.iter().map(|record| coerce_amount(record.get(field))).sum()
}

pub fn sum_by<T, F>(records: &[T], amount: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(amount).sum()
}

pub fn sum_where<T, P, F>(records: &[T], predicate: P, amount: F) -> f64
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> f64,
{
    records.iter().filter(|r| predicate(r)).map(amount).sum()
}

pub fn count_where<T, P>(records: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

/// Invoiced minus paid. Negative when a client has overpaid; never clamped.
pub fn outstanding_balance(invoices: &[Invoice], payments: &[Payment]) -> f64 {
    sum_by(invoices, |i| i.total_amount) - sum_by(payments, |p| p.amount)
}

/// `outstanding_balance` over references, for joined subsets
fn balance_of(invoices: &[&Invoice], payments: &[&Payment]) -> (f64, f64) {
    let invoiced = invoices.iter().map(|i| i.total_amount).sum();
    let paid = payments.iter().map(|p| p.amount).sum();
    (invoiced, paid)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientFinancials {
    pub client_id: RecordId,
    pub invoiced: f64,
    pub paid: f64,
    pub balance: f64,
    pub invoice_count: usize,
    pub open_invoice_count: usize,
    pub payment_count: usize,
}

impl ClientFinancials {
    pub fn compute(client_id: &RecordId, invoices: &[Invoice], payments: &[Payment]) -> Self {
        let invoices = join_many(Some(client_id), invoices, |i| i.client_id.as_ref());
        let payments = join_many(Some(client_id), payments, |p| p.client_id.as_ref());
        let (invoiced, paid) = balance_of(&invoices, &payments);

        Self {
            client_id: client_id.clone(),
            invoiced,
            paid,
            balance: invoiced - paid,
            invoice_count: invoices.len(),
            open_invoice_count: invoices.iter().filter(|i| i.is_open()).count(),
            payment_count: payments.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectFinancials {
    pub project_id: RecordId,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    pub cost_variance: f64,
    pub invoiced: f64,
    pub paid: f64,
    pub balance: f64,
}

impl ProjectFinancials {
    /// None when the project has no identifier to join on
    pub fn compute(project: &Project, invoices: &[Invoice], payments: &[Payment]) -> Option<Self> {
        let project_id = project.id()?;
        let invoices = join_many(Some(project_id), invoices, |i| i.project_id.as_ref());
        let payments = join_many(Some(project_id), payments, |p| p.project_id.as_ref());
        let (invoiced, paid) = balance_of(&invoices, &payments);

        Some(Self {
            project_id: project_id.clone(),
            estimated_cost: project.estimated_cost,
            actual_cost: project.actual_cost,
            cost_variance: project.cost_variance(),
            invoiced,
            paid,
            balance: invoiced - paid,
        })
    }
}

/// Headline counters for the console's landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub clients: usize,
    pub active_projects: usize,
    pub pending_permits: usize,
    pub upcoming_inspections: usize,
    pub upcoming_site_visits: usize,
    pub open_invoices: usize,
    pub total_invoiced: f64,
    pub total_paid: f64,
    pub outstanding_balance: f64,
}

impl DashboardStats {
    /// `today` anchors the upcoming window so results are reproducible
    pub fn compute(data: &Collections, today: NaiveDate) -> Self {
        let total_invoiced = sum_by(&data.invoices, |i| i.total_amount);
        let total_paid = sum_by(&data.payments, |p| p.amount);

        Self {
            clients: data.clients.len(),
            active_projects: count_where(&data.projects, Project::is_active),
            pending_permits: count_where(&data.permits, |p| p.is_pending()),
            upcoming_inspections: count_where(&data.inspections, |i| {
                i.is_scheduled() && is_upcoming(i.inspection_date, today)
            }),
            upcoming_site_visits: count_where(&data.site_visits, |v| {
                v.is_scheduled() && is_upcoming(v.visit_date, today)
            }),
            open_invoices: count_where(&data.invoices, Invoice::is_open),
            total_invoiced,
            total_paid,
            outstanding_balance: total_invoiced - total_paid,
        }
    }
}

/// Within `[today, today + UPCOMING_WINDOW_DAYS]`. Undated records are not upcoming.
pub fn is_upcoming(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    let Some(date) = date else {
        return false;
    };
    let horizon = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    date >= today && date <= horizon
}
