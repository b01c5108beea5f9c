use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiError, EntityApi};
use crate::config::CoreConfig;
use crate::models::{EntityKind, RecordId};

/// reqwest-backed REST client for the permitting backend
pub struct HttpApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn from_config(config: &CoreConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Self::with_client(&config.api_base_url, client)
    }

    fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base_url, client })
    }

    fn url(&self, kind: EntityKind, id: Option<&RecordId>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(kind.path());
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    async fn send(request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl EntityApi for HttpApi {
    async fn list(&self, kind: EntityKind) -> Result<Value, ApiError> {
        let url = self.url(kind, None)?;
        debug!("{}: GET {}", kind, url);
        Self::send(self.client.get(url)).await
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<Value, ApiError> {
        let url = self.url(kind, Some(id))?;
        Self::send(self.client.get(url)).await
    }

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Value, ApiError> {
        let url = self.url(kind, None)?;
        Self::send(self.client.post(url).json(&body)).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        patch: Value,
    ) -> Result<Value, ApiError> {
        let url = self.url(kind, Some(id))?;
        Self::send(self.client.patch(url).json(&patch)).await
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), ApiError> {
        let url = self.url(kind, Some(id))?;
        Self::send(self.client.delete(url)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_and_record_urls() {
        let api = HttpApi::new("https://permits.example.com/api/").unwrap();

        let url = api.url(EntityKind::SiteVisit, None).unwrap();
        assert_eq!(url.as_str(), "https://permits.example.com/api/site-visits");

        let id = RecordId::from("P 1/2");
        let url = api.url(EntityKind::Project, Some(&id)).unwrap();
        assert_eq!(url.as_str(), "https://permits.example.com/api/projects/P%201%2F2");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpApi::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpApi::new("mailto:office@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires a running backend at SITEBOOK_API_URL
    async fn test_list_clients_live() {
        let base = std::env::var("SITEBOOK_API_URL").expect("SITEBOOK_API_URL not set");
        let api = HttpApi::new(&base).unwrap();

        let payload = api.get_clients().await.unwrap();
        assert!(payload.is_array() || payload.get("items").is_some());
    }
}
