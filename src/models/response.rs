use serde::{Deserialize, Serialize};

use super::source::SourceDocument;

/// Response of `/api/v1/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SourceDocument>,
    pub query: String,
    pub count: usize,
}

/// Response of the non-streaming `/api/v1/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
    pub query: String,
}

/// Response of `/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Response of `/health/ready`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessResponse {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub llm_provider: Option<String>,
}

impl ReadinessResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    pub fn database_connected(&self) -> bool {
        self.database.as_deref() == Some("connected")
    }
}

/// Uniform error body returned by the service
///
/// `detail` is usually a string; validation failures carry a structured value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// The detail rendered as a message, if present and non-empty.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
