//! Conversation state owned by the chat controller.

use crate::models::{ChatMessage, HistoryEntry};

/// Ordered message list plus the streaming flag and last error.
///
/// At most one message is streaming, and only the last one. Mutation goes
/// through `begin_exchange` and the assembler in `super::assembler`.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    streaming: bool,
    error: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// True while the last assistant message is receiving events.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Most recent error, cleared by the next send.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Prior turns to send along with the next request (finalized messages only).
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .filter(|m| !m.streaming)
            .map(HistoryEntry::from)
            .collect()
    }

    /// Append the user's query and an empty streaming assistant message.
    pub fn begin_exchange(&mut self, query: impl Into<String>) {
        self.messages.push(ChatMessage::user(query));
        self.messages.push(ChatMessage::assistant_placeholder());
        self.streaming = true;
        self.error = None;
    }

    /// Drop all messages and the error.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.streaming = false;
        self.error = None;
    }

    /// The message currently receiving events, if any.
    pub(super) fn streaming_message_mut(&mut self) -> Option<&mut ChatMessage> {
        if !self.streaming {
            return None;
        }
        self.messages.last_mut().filter(|m| m.streaming)
    }

    pub(super) fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub(super) fn end_streaming(&mut self) {
        self.streaming = false;
    }
}
