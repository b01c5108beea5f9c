use std::time::Duration;

use crate::constants::{API_BASE_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

const ENV_API_URL: &str = "SITEBOOK_API_URL";
const ENV_CACHE_TTL_SECS: &str = "SITEBOOK_CACHE_TTL_SECS";

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Backend base URL; collection paths are appended to it
    pub api_base_url: String,
    /// How long a fetched collection stays fresh
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl CoreConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Apply `SITEBOOK_API_URL` / `SITEBOOK_CACHE_TTL_SECS` overrides.
    /// Unparseable values are ignored with a warning.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(raw) = std::env::var(ENV_CACHE_TTL_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.cache_ttl = Duration::from_secs(secs),
                Err(_) => tracing::warn!("{} is not a number: {:?}", ENV_CACHE_TTL_SECS, raw),
            }
        }
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
