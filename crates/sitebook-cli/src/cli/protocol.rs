use serde::{Deserialize, Serialize};
use sitebook_core::CacheError;

/// Envelope printed on stdout for every command
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    /// Whether running the command again may succeed
    pub retryable: bool,
}

impl Response {
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn error(code: &str, message: &str, retryable: bool) -> Self {
        Self {
            result: None,
            error: Some(ErrorInfo {
                code: code.to_string(),
                message: message.to_string(),
                retryable,
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<CacheError> for Response {
    fn from(err: CacheError) -> Self {
        let code = match &err {
            CacheError::Fetch { .. } => "fetch_failed",
            CacheError::NotFound { .. } => "not_found",
            CacheError::Closed { .. } => "closed",
        };
        Response::error(code, &err.to_string(), err.is_retryable())
    }
}

/// CLI command parsed from arguments
#[derive(Debug, Clone)]
pub enum CliCommand {
    /// List clients
    Clients,
    /// List projects with client names and financials
    Projects { status: Option<String> },
    /// List permits joined with project and client
    Permits { status: Option<String> },
    /// List inspections joined with their project
    Inspections,
    /// Per-client invoiced / paid / balance
    Financials { client_id: Option<String> },
    /// Headline counters
    Dashboard,
}
