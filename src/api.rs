//! Client for the legal-assistant service API.
//!
//! All calls go through the [`HttpClient`] seam so tests can substitute
//! [`crate::adapters::mock::MockHttpClient`] for the reqwest adapter.

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::error::ApiError;
use crate::models::{
    ChatRequest, ChatResponse, HealthResponse, ReadinessResponse, SearchRequest, SearchResponse,
};
use crate::sse::{decode_stream, EventStream};
use crate::traits::{Headers, HttpClient, Response};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const CHAT_STREAM_PATH: &str = "/api/v1/chat/stream";
pub const CHAT_PATH: &str = "/api/v1/chat";
pub const SEARCH_PATH: &str = "/api/v1/search";
pub const HEALTH_PATH: &str = "/health";
pub const READINESS_PATH: &str = "/health/ready";

/// Client for the service endpoints.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Debug)]
pub struct ApiClient<H: HttpClient> {
    base_url: String,
    http: Arc<H>,
}

impl<H: HttpClient> Clone for ApiClient<H> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: Arc::clone(&self.http),
        }
    }
}

impl ApiClient<ReqwestHttpClient> {
    /// Client for `base_url` backed by reqwest.
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self::new(base_url, ReqwestHttpClient::new())
    }
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(base_url: impl Into<String>, http: H) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            http: Arc::new(http),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Open the streaming chat endpoint.
    ///
    /// Resolves once the response headers arrived with a 2xx status. The
    /// returned stream yields decoded events until `Done`, end of body or
    /// the first transport error.
    pub async fn stream_chat(&self, request: &ChatRequest) -> Result<EventStream, ApiError> {
        let url = self.url(CHAT_STREAM_PATH);
        let body = serde_json::to_string(request)?;

        let mut headers = json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        tracing::debug!("Opening chat stream at {}", url);
        let bytes = self.http.post_stream(&url, &body, &headers).await?;
        Ok(decode_stream(bytes))
    }

    /// Non-streaming chat: the complete answer in one response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = self.url(CHAT_PATH);
        let body = serde_json::to_string(request)?;
        let response = self.http.post(&url, &body, &json_headers()).await?;
        parse_json(response)
    }

    /// Semantic search over the indexed documents.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let url = self.url(SEARCH_PATH);
        let body = serde_json::to_string(request)?;
        let response = self.http.post(&url, &body, &json_headers()).await?;
        parse_json(response)
    }

    /// Liveness probe.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.http.get(&self.url(HEALTH_PATH), &Headers::new()).await?;
        parse_json(response)
    }

    /// Readiness probe, including database and LLM provider status.
    pub async fn readiness(&self) -> Result<ReadinessResponse, ApiError> {
        let response = self
            .http
            .get(&self.url(READINESS_PATH), &Headers::new())
            .await?;
        parse_json(response)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// Canonical text for an HTTP status code, if it has one.
pub(crate) fn status_text(status: u16) -> Option<&'static str> {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
}

fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(
            response.status,
            status_text(response.status),
            &response.body,
        ));
    }
    Ok(response.json()?)
}
