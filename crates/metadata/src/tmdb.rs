//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use tracing::{debug, warn};

use crate::MetadataError;
use crate::provider::{QueryParams, UpstreamSource};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Immutable client settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// `None` when the key is unset or blank. Requests then fail with
    /// [`MetadataError::Configuration`].
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl TmdbConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        Self {
            api_key: (!key.trim().is_empty()).then_some(key),
            ..Default::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MetadataError::Configuration(format!("build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    async fn get_json(
        &self,
        path: &str,
        params: &QueryParams<'_>,
    ) -> Result<serde_json::Value, MetadataError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| MetadataError::Configuration("TMDB_API_KEY not set".into()))?;

        let mut all_params: Vec<(&str, &str)> = vec![("api_key", api_key)];
        all_params.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the API key.
                let e = e.without_url();
                warn!(path, error = %e, "TMDB unreachable");
                MetadataError::Unavailable(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let content_type = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = resp
                .bytes()
                .await
                .map_err(|e| MetadataError::Unavailable(e.without_url().to_string()))?;
            warn!(path, status = status.as_u16(), "TMDB returned an error status");
            return Err(MetadataError::Upstream {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        resp.json().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                MetadataError::Unavailable(e.to_string())
            } else {
                MetadataError::MalformedRecord(format!("parse JSON: {e}"))
            }
        })
    }
}

#[async_trait::async_trait]
impl UpstreamSource for TmdbClient {
    async fn fetch(
        &self,
        path: &str,
        params: &QueryParams<'_>,
    ) -> Result<serde_json::Value, MetadataError> {
        self.get_json(path, params).await
    }
}
