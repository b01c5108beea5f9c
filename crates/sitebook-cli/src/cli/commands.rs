use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use sitebook_core::store::{
    client_financial_rows, inspection_rows, permit_rows, project_rows, DashboardStats,
};
use sitebook_core::{AppData, CacheError, Collections, EntityKind, RecordId};
use tracing::debug;

use crate::cli::protocol::{CliCommand, Response};

fn respond<T: Serialize>(value: &T) -> Response {
    match serde_json::to_value(value) {
        Ok(json) => Response::success(json),
        Err(e) => Response::error("serialize_failed", &e.to_string(), false),
    }
}

/// Run one command against the data scope. `today` anchors date windows.
pub async fn execute(data: &AppData, command: CliCommand, today: NaiveDate) -> Response {
    debug!("executing {:?}", command);
    match run(data, command, today).await {
        Ok(response) => response,
        Err(err) => Response::from(err),
    }
}

async fn run(
    data: &AppData,
    command: CliCommand,
    today: NaiveDate,
) -> Result<Response, CacheError> {
    match command {
        CliCommand::Clients => {
            let clients = data.clients.get_all(false).await?;
            Ok(respond(&*clients))
        }

        CliCommand::Projects { status } => {
            let mut loaded = data.load_all(false).await?;
            if let Some(status) = status {
                data.projects.set_status_filter(&status);
                loaded.projects = Arc::new(data.projects.get_filtered().await?);
            }
            Ok(respond(&project_rows(&loaded)))
        }

        CliCommand::Permits { status } => {
            let mut loaded = load_for_permits(data).await?;
            if let Some(status) = status {
                data.permits.set_status_filter(&status);
                loaded.permits = Arc::new(data.permits.get_filtered().await?);
            }
            Ok(respond(&permit_rows(&loaded)))
        }

        CliCommand::Inspections => {
            let (inspections, permits, projects) = tokio::try_join!(
                data.inspections.get_all(false),
                data.permits.get_all(false),
                data.projects.get_all(false),
            )?;
            let loaded = Collections {
                inspections,
                permits,
                projects,
                ..Default::default()
            };
            Ok(respond(&inspection_rows(&loaded)))
        }

        CliCommand::Financials { client_id } => {
            let loaded = data.load_all(false).await?;
            let wanted = client_id.map(RecordId::new);

            if let Some(id) = &wanted {
                if data.clients.get_one(id).await?.is_none() {
                    return Err(CacheError::NotFound {
                        kind: EntityKind::Client,
                        id: id.clone(),
                    });
                }
            }
            Ok(respond(&client_financial_rows(&loaded, wanted.as_ref())))
        }

        CliCommand::Dashboard => {
            let loaded = data.load_all(false).await?;
            Ok(respond(&DashboardStats::compute(&loaded, today)))
        }
    }
}

/// Permits, projects and clients in one combined wait
async fn load_for_permits(data: &AppData) -> Result<Collections, CacheError> {
    let (permits, projects, clients) = tokio::try_join!(
        data.permits.get_all(false),
        data.projects.get_all(false),
        data.clients.get_all(false),
    )?;

    Ok(Collections {
        permits,
        projects,
        clients,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use sitebook_core::models::resolve_id;
    use sitebook_core::{ApiError, CoreConfig, EntityApi};
    use std::collections::HashMap;

    /// Serves fixed collections; by-id reads look inside them
    struct StaticApi {
        collections: HashMap<EntityKind, Value>,
    }

    #[async_trait]
    impl EntityApi for StaticApi {
        async fn list(&self, kind: EntityKind) -> Result<Value, ApiError> {
            Ok(self
                .collections
                .get(&kind)
                .cloned()
                .unwrap_or_else(|| json!([])))
        }

        async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Value, ApiError> {
            let records = self.collections.get(&kind).and_then(Value::as_array);
            records
                .into_iter()
                .flatten()
                .find(|r| resolve_id(r, kind.id_aliases()).as_ref() == Some(id))
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    body: String::new(),
                })
        }

        async fn create(&self, _kind: EntityKind, body: Value) -> Result<Value, ApiError> {
            Ok(body)
        }

        async fn update(
            &self,
            _kind: EntityKind,
            _id: &RecordId,
            patch: Value,
        ) -> Result<Value, ApiError> {
            Ok(patch)
        }

        async fn delete(&self, _kind: EntityKind, _id: &RecordId) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn app_data() -> AppData {
        let collections = HashMap::from([
            (EntityKind::Client, json!([{ "Client ID": "C1", "Full Name": "Jane" }])),
            (
                EntityKind::Project,
                json!([
                    { "Project ID": "P1", "Client ID": "C1", "Status": "Active" },
                    { "Project ID": "P2", "Client ID": "C1", "Status": "Closed" },
                ]),
            ),
            (
                EntityKind::Permit,
                json!({ "items": [
                    { "Permit ID": "X1", "Project ID": "P1", "Status": "Pending" },
                    { "Permit ID": "X2", "Project ID": "P404", "Status": "Approved" },
                ] }),
            ),
            (EntityKind::Invoice, json!([{ "client_id": "C1", "total_amount": 500 }])),
            (EntityKind::Payment, json!([{ "client_id": "C1", "amount": "200" }])),
        ]);
        AppData::new(Arc::new(StaticApi { collections }), &CoreConfig::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_permits_command_joins_and_filters() {
        let data = app_data();

        let all = execute(&data, CliCommand::Permits { status: None }, today()).await;
        let rows = all.result.unwrap();
        assert_eq!(rows[0]["client_name"], "Jane");
        assert_eq!(rows[1]["project_name"], "Unknown");

        let pending = execute(
            &data,
            CliCommand::Permits {
                status: Some("pending".to_string()),
            },
            today(),
        )
        .await;
        let rows = pending.result.unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["permit_id"], "X1");
    }

    #[tokio::test]
    async fn test_financials_command() {
        let data = app_data();

        let response = execute(&data, CliCommand::Financials { client_id: None }, today()).await;
        assert_eq!(response.result.unwrap()[0]["balance"], 300.0);

        let missing = execute(
            &data,
            CliCommand::Financials {
                client_id: Some("C9".to_string()),
            },
            today(),
        )
        .await;
        assert_eq!(missing.error.unwrap().code, "not_found");
    }

    #[tokio::test]
    async fn test_dashboard_command() {
        let data = app_data();
        let response = execute(&data, CliCommand::Dashboard, today()).await;
        let stats = response.result.unwrap();

        assert_eq!(stats["active_projects"], 1);
        assert_eq!(stats["pending_permits"], 1);
        assert_eq!(stats["outstanding_balance"], 300.0);
    }

    #[tokio::test]
    async fn test_closed_scope_reports_error() {
        let data = app_data();
        data.close();

        let response = execute(&data, CliCommand::Clients, today()).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, "closed");
        assert!(!error.retryable);
    }
}
