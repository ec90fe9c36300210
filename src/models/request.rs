use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::message::{ChatMessage, Role};

/// Prior turn sent along with a chat request (role and content only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Request body for `/api/v1/chat` and `/api/v1/chat/stream`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f32>,
    /// Restricts retrieval to documents whose metadata matches every entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<Map<String, Value>>,
}

impl ChatRequest {
    /// Create a request with no history and server-side retrieval defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            conversation_history: Vec::new(),
            top_k: None,
            similarity_threshold: None,
            metadata_filter: None,
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.conversation_history = history;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }
}

/// Request body for `/api/v1/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<Map<String, Value>>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            similarity_threshold: None,
            metadata_filter: None,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    /// Match documents by metadata. An empty filter is not sent.
    pub fn with_metadata_filter(mut self, filter: Map<String, Value>) -> Self {
        self.metadata_filter = Some(filter).filter(|f| !f.is_empty());
        self
    }
}
