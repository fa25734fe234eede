use crate::MetadataError;

/// Query parameters forwarded to the provider. Never carries the API key.
pub type QueryParams<'a> = [(&'a str, String)];

/// A metadata provider reachable over a path + query interface.
#[async_trait::async_trait]
pub trait UpstreamSource: Send + Sync {
    /// GET `path` relative to the provider base URL and return the parsed
    /// JSON body. The implementation injects its own credentials.
    async fn fetch(
        &self,
        path: &str,
        params: &QueryParams<'_>,
    ) -> Result<serde_json::Value, MetadataError>;
}
