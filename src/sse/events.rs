//! Protocol event types for the chat stream.

use thiserror::Error;

use crate::models::SourceDocument;

/// A decoded event from the chat stream, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolEvent {
    /// Incremental answer text, verbatim
    Token(String),
    /// Sources cited by the answer
    Sources(Vec<SourceDocument>),
    /// The answer is complete
    Done,
}

impl ProtocolEvent {
    /// Returns the wire event name.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            ProtocolEvent::Token(_) => "token",
            ProtocolEvent::Sources(_) => "sources",
            ProtocolEvent::Done => "done",
        }
    }
}

/// A single classified record of the stream
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// `event: <name>`, name trimmed
    Event(String),
    /// `data: <payload>`, payload untouched
    Data(String),
    /// Blank record, resets the current event name
    Empty,
    /// Anything else
    Other(String),
}

/// Errors for individual payloads. Never fatal to the stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SseParseError {
    /// Payload of a JSON-carrying event did not parse
    #[error("Invalid JSON for event '{event_type}': {reason}")]
    InvalidJson { event_type: String, reason: String },
}
