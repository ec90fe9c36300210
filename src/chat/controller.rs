//! Conversation-level API: send, receive updates, stop, clear.

use tokio::sync::mpsc;

use super::assembler::{apply_event, finish, Applied};
use super::session::{
    open_session, SessionHandle, SessionId, SessionMessage, SessionUpdate, Termination,
};
use super::state::ConversationState;
use crate::api::ApiClient;
use crate::models::ChatRequest;
use crate::settings::Settings;
use crate::sse::ProtocolEvent;
use crate::traits::HttpClient;

/// Why a send was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Query was empty after trimming
    Empty,
    /// A session is still streaming
    Busy,
}

/// Result of [`ChatController::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Started(SessionId),
    Rejected(RejectReason),
}

/// A change applied to the conversation, for the UI to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    /// Text appended to the streaming message
    Token(String),
    /// Sources attached to the streaming message (count)
    Sources(usize),
    /// The streaming message was finalized
    Finished(Termination),
}

/// Owns one conversation and at most one streaming session.
///
/// All state mutation happens on the caller's task, inside `recv`, `drain`,
/// `stop` and `clear`. The session task only produces messages.
pub struct ChatController<H: HttpClient> {
    pub(super) client: ApiClient<H>,
    pub(super) state: ConversationState,
    pub(super) settings: Settings,
    pub(super) active: Option<SessionHandle>,
    next_session_id: SessionId,
    message_tx: mpsc::UnboundedSender<SessionMessage>,
    message_rx: mpsc::UnboundedReceiver<SessionMessage>,
}

impl<H: HttpClient + 'static> ChatController<H> {
    pub fn new(client: ApiClient<H>, settings: Settings) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            client,
            state: ConversationState::new(),
            settings: settings.clamped(),
            active: None,
            next_session_id: 1,
            message_tx,
            message_rx,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Retrieval parameters for subsequent sends.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
    }

    pub fn is_streaming(&self) -> bool {
        self.state.is_streaming()
    }

    /// Id of the session currently streaming, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        self.active.as_ref().map(SessionHandle::id)
    }

    /// Start a new exchange.
    ///
    /// Rejected without touching state when the query is blank or a session
    /// is still streaming.
    pub fn send(&mut self, query: &str) -> SendOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SendOutcome::Rejected(RejectReason::Empty);
        }
        if self.state.is_streaming() || self.active.is_some() {
            tracing::debug!("Rejecting send while session is streaming");
            return SendOutcome::Rejected(RejectReason::Busy);
        }

        let request = ChatRequest::new(query)
            .with_history(self.state.history())
            .with_top_k(self.settings.top_k)
            .with_similarity_threshold(self.settings.similarity_threshold);

        self.state.begin_exchange(query);

        let session_id = self.next_session_id;
        self.next_session_id += 1;
        self.active = Some(open_session(
            self.client.clone(),
            request,
            session_id,
            self.message_tx.clone(),
        ));
        SendOutcome::Started(session_id)
    }

    /// Wait for the next update of the active session and apply it.
    ///
    /// Returns `None` when no session is active.
    pub async fn recv(&mut self) -> Option<ChatUpdate> {
        while self.active.is_some() {
            let message = self.message_rx.recv().await?;
            if let Some(update) = self.handle_message(message) {
                return Some(update);
            }
        }
        None
    }

    /// Apply every message already queued, without waiting.
    pub fn drain(&mut self) -> Vec<ChatUpdate> {
        let mut updates = Vec::new();
        while let Ok(message) = self.message_rx.try_recv() {
            if let Some(update) = self.handle_message(message) {
                updates.push(update);
            }
        }
        updates
    }

    fn handle_message(&mut self, message: SessionMessage) -> Option<ChatUpdate> {
        if self.active_session() != Some(message.session_id) {
            tracing::debug!("Dropping message from stale session {}", message.session_id);
            return None;
        }

        match message.update {
            SessionUpdate::Event(ProtocolEvent::Done) => {
                Some(self.finish_active(Termination::Completed))
            }
            SessionUpdate::Event(event) => {
                let update = match &event {
                    ProtocolEvent::Token(text) => ChatUpdate::Token(text.clone()),
                    ProtocolEvent::Sources(sources) => ChatUpdate::Sources(sources.len()),
                    ProtocolEvent::Done => return None,
                };
                match apply_event(&mut self.state, event) {
                    Applied::Ignored => None,
                    _ => Some(update),
                }
            }
            SessionUpdate::Finished(termination) => Some(self.finish_active(termination)),
        }
    }

    /// Finalize the streaming message and forget the active session.
    pub(super) fn finish_active(&mut self, termination: Termination) -> ChatUpdate {
        self.active = None;
        finish(&mut self.state, &termination);
        ChatUpdate::Finished(termination)
    }
}
