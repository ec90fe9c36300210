use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::source::SourceDocument;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in the client-side conversation.
///
/// Assistant messages are created empty with `streaming = true` and grow
/// token by token until finalized. Once `streaming` is cleared the content
/// is frozen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Text content (append-only while streaming)
    pub content: String,
    /// Sources cited by the answer, assistant messages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceDocument>>,
    /// Whether the message is still receiving tokens
    #[serde(default)]
    pub streaming: bool,
    /// When the message was created locally
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a finished user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: None,
            streaming: false,
            created_at: Utc::now(),
        }
    }

    /// Create the empty assistant placeholder that receives streamed tokens.
    pub fn assistant_placeholder() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            sources: None,
            streaming: true,
            created_at: Utc::now(),
        }
    }

    /// Create a finished assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources: None,
            streaming: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// Append a token while streaming. Ignored once the message is finalized.
    pub fn append_token(&mut self, token: &str) -> bool {
        if !self.streaming {
            return false;
        }
        self.content.push_str(token);
        true
    }

    /// Number of sources attached to the message.
    pub fn source_count(&self) -> usize {
        self.sources.as_ref().map_or(0, Vec::len)
    }
}
