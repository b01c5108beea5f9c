//! Table rows for the console pages, built from a loaded `Collections`.
//!
//! Broken links never fail a row: a missing project or client shows as
//! "Unknown", an empty field as "Not set".

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{NOT_SET_LABEL, UNKNOWN_LABEL};
use crate::models::{Client, Project, RecordId};
use crate::store::aggregate::{ClientFinancials, ProjectFinancials};
use crate::store::app_data::Collections;
use crate::store::join::{inspection_project, join_many, JoinIndex};

fn or_not_set(value: Option<&str>) -> String {
    value.unwrap_or(NOT_SET_LABEL).to_string()
}

fn client_name(client: Option<&Client>) -> String {
    client.map_or(UNKNOWN_LABEL, Client::display_name).to_string()
}

fn project_name(project: Option<&Project>) -> String {
    project.map_or(UNKNOWN_LABEL, Project::display_name).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct PermitRow {
    pub permit_id: Option<RecordId>,
    pub permit_number: String,
    pub permit_type: String,
    pub status: String,
    pub submission_date: Option<NaiveDate>,
    pub project_name: String,
    pub client_name: String,
}

/// Permits joined with their project and, through it, the client
pub fn permit_rows(data: &Collections) -> Vec<PermitRow> {
    let projects = JoinIndex::build(&data.projects);
    let clients = JoinIndex::build(&data.clients);

    data.permits
        .iter()
        .map(|permit| {
            let project = projects.get(permit.project_id.as_ref());
            let client = project.and_then(|p| clients.get(p.client_id.as_ref()));

            PermitRow {
                permit_id: permit.id.clone(),
                permit_number: or_not_set(permit.permit_number.as_deref()),
                permit_type: or_not_set(permit.permit_type.as_deref()),
                status: or_not_set(permit.status.as_deref()),
                submission_date: permit.submission_date,
                project_name: project_name(project),
                client_name: client_name(client),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionRow {
    pub inspection_id: Option<RecordId>,
    pub inspection_type: String,
    pub status: String,
    pub inspection_date: Option<NaiveDate>,
    pub inspector: String,
    pub project_name: String,
    pub deficiency_count: usize,
    pub photo_count: usize,
}

pub fn inspection_rows(data: &Collections) -> Vec<InspectionRow> {
    data.inspections
        .iter()
        .map(|inspection| {
            let project = inspection_project(inspection, &data.permits, &data.projects);

            InspectionRow {
                inspection_id: inspection.id.clone(),
                inspection_type: or_not_set(inspection.inspection_type.as_deref()),
                status: or_not_set(inspection.status.as_deref()),
                inspection_date: inspection.inspection_date,
                inspector: or_not_set(inspection.inspector.as_deref()),
                project_name: project_name(project),
                deficiency_count: inspection.deficiencies.len(),
                photo_count: inspection.photos.len(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub project_id: Option<RecordId>,
    pub name: String,
    pub status: String,
    pub client_name: String,
    pub permit_count: usize,
    pub financials: Option<ProjectFinancials>,
}

pub fn project_rows(data: &Collections) -> Vec<ProjectRow> {
    let clients = JoinIndex::build(&data.clients);

    data.projects
        .iter()
        .map(|project| ProjectRow {
            project_id: project.id.clone(),
            name: project.display_name().to_string(),
            status: or_not_set(project.status.as_deref()),
            client_name: client_name(clients.get(project.client_id.as_ref())),
            permit_count: join_many(project.id.as_ref(), &data.permits, |p| {
                p.project_id.as_ref()
            })
            .len(),
            financials: ProjectFinancials::compute(project, &data.invoices, &data.payments),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientFinancialsRow {
    pub client_name: String,
    #[serde(flatten)]
    pub financials: ClientFinancials,
}

/// One row per identifiable client. `only` narrows to a single client.
pub fn client_financial_rows(
    data: &Collections,
    only: Option<&RecordId>,
) -> Vec<ClientFinancialsRow> {
    data.clients
        .iter()
        .filter_map(|client| {
            let id = client.id.as_ref()?;
            if only.is_some_and(|wanted| wanted != id) {
                return None;
            }
            Some(ClientFinancialsRow {
                client_name: client.display_name().to_string(),
                financials: ClientFinancials::compute(id, &data.invoices, &data.payments),
            })
        })
        .collect()
}
