//! HTTP fetcher backed by reqwest

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::ResourceFetcher;
use crate::error::{DashError, Result};
use crate::resource::{Document, ResourceKind};

/// Default API base URL used by the dashboard
pub const DEFAULT_API_URL: &str = "http://localhost:5500/api";

/// Fetches resource listings from the data service over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher for `base_url` (e.g. `http://localhost:5500/api`).
    ///
    /// Without a timeout a request waits as long as the transport allows.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DashError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, kind: ResourceKind) -> Result<Vec<Document>> {
        let url = format!("{}{}", self.base_url, kind.endpoint());
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashError::http_status(
                status.as_u16(),
                status.canonical_reason(),
            ));
        }

        Ok(response.json::<Vec<Document>>().await?)
    }

    fn base_address(&self) -> String {
        service_address(&self.base_url).to_string()
    }
}

/// Base URL with its trailing `/api` path segment removed
pub fn service_address(base_url: &str) -> &str {
    base_url.strip_suffix("/api").unwrap_or(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::spawn_for_tests;
    use crate::storage::MemoryStore;
    use axum::{routing::get, Router};
    use serde_json::json;

    #[test]
    fn test_service_address() {
        assert_eq!(
            service_address("http://localhost:5500/api"),
            "http://localhost:5500"
        );
        assert_eq!(
            service_address("http://example.com:8080"),
            "http://example.com:8080"
        );
        assert_eq!(
            service_address("https://api.example.com/api"),
            "https://api.example.com"
        );
        assert_eq!(
            service_address("http://apihost:5500/v1/api"),
            "http://apihost:5500/v1"
        );
    }

    #[test]
    fn test_api_host_keeps_full_address() {
        let fetcher = HttpFetcher::new("https://api.example.com/api", None).unwrap();
        assert_eq!(fetcher.base_address(), "https://api.example.com");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let fetcher = HttpFetcher::new("http://localhost:5500/api/", None).unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:5500/api");
        assert_eq!(fetcher.base_address(), "http://localhost:5500");
    }

    #[tokio::test]
    async fn test_fetch_from_service() {
        let users = vec![json!({"_id": "1", "name": "Bob"})
            .as_object()
            .cloned()
            .unwrap()];
        let store = MemoryStore::new().with_documents(ResourceKind::Users, users.clone());
        let addr = spawn_for_tests(store).await;

        let fetcher = HttpFetcher::new(format!("http://{addr}/api"), None).unwrap();
        assert_eq!(fetcher.fetch(ResourceKind::Users).await.unwrap(), users);
        assert!(fetcher.fetch(ResourceKind::Jobs).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let store = MemoryStore::new().failing(ResourceKind::Jobs);
        let addr = spawn_for_tests(store).await;

        let fetcher = HttpFetcher::new(format!("http://{addr}/api"), None).unwrap();
        let err = fetcher.fetch(ResourceKind::Jobs).await.unwrap_err();
        assert!(matches!(err, DashError::HttpStatus { status: 500, .. }));
        assert_eq!(
            err.to_string(),
            "HTTP error! Status: 500 - Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_non_array_body_is_decode_error() {
        let app = Router::new().route("/api/users", get(|| async { "not json" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let fetcher = HttpFetcher::new(format!("http://{addr}/api"), None).unwrap();
        let err = fetcher.fetch(ResourceKind::Users).await.unwrap_err();
        assert!(matches!(err, DashError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(format!("http://{addr}/api"), None).unwrap();
        let err = fetcher.fetch(ResourceKind::Customers).await.unwrap_err();
        assert!(matches!(err, DashError::Network(_)));
    }
}
