use std::time::Duration;

use compare_logging::{compare_debug, compare_info};
use futures_util::StreamExt;
use serde_json::{json, Value};
use url::Url;

use crate::{FailureKind, SearchError};

/// The backend drives one app per platform and may need minutes to answer.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(350);

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Base URL of the search backend, e.g. `http://localhost:5000`.
    pub endpoint: String,
    pub search_path: String,
    pub health_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            search_path: "/api/search".to_string(),
            health_path: "/health".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Human-readable location of the backend, used in error messages.
    fn endpoint(&self) -> &str;

    /// Ask the backend for prices of `query`; returns the raw JSON payload.
    async fn search(&self, query: &str) -> Result<Value, SearchError>;

    async fn health(&self) -> Result<(), SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchBackend {
    settings: SearchSettings,
}

impl ReqwestSearchBackend {
    pub fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SearchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))
    }

    fn url_for(&self, path: &str) -> Result<Url, SearchError> {
        let base = self.settings.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| SearchError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    /// Reads the body, refusing to buffer more than `max_bytes`.
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SearchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl SearchBackend for ReqwestSearchBackend {
    fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    async fn search(&self, query: &str) -> Result<Value, SearchError> {
        let url = self.url_for(&self.settings.search_path)?;
        let client = self.build_client()?;
        compare_info!("POST {} product_name={:?}", url, query);

        let response = client
            .post(url)
            .json(&json!({ "product_name": query }))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        compare_debug!("Search answered {} with {} bytes", status, bytes.len());

        if !status.is_success() {
            let reason = error_reason(&bytes).unwrap_or_else(|| status.to_string());
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                reason,
            ));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| SearchError::new(FailureKind::InvalidPayload, err.to_string()))
    }

    async fn health(&self) -> Result<(), SearchError> {
        let url = self.url_for(&self.settings.health_path)?;
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }
}

/// The backend reports failures as `{"error": "..."}`.
fn error_reason(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(ToOwned::to_owned)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> SearchError {
    SearchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_without_double_slashes() {
        let backend = ReqwestSearchBackend::new(SearchSettings {
            endpoint: "http://localhost:5000/".to_string(),
            ..SearchSettings::default()
        });
        let url = backend.url_for("/api/search").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/search");
    }

    #[test]
    fn url_for_rejects_garbage_endpoint() {
        let backend = ReqwestSearchBackend::new(SearchSettings {
            endpoint: "not a url".to_string(),
            ..SearchSettings::default()
        });
        let err = backend.url_for("/api/search").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }

    #[test]
    fn error_reason_reads_backend_error_field() {
        assert_eq!(
            error_reason(br#"{"error": "Product name required"}"#),
            Some("Product name required".to_string())
        );
        assert_eq!(error_reason(b"<html>oops</html>"), None);
        assert_eq!(error_reason(br#"{"error": ""}"#), None);
    }
}
