//! Stream session: one streaming request from issuance to terminal signal.
//!
//! A session runs as its own tokio task and reports back over an unbounded
//! channel. Every message carries the session id so the controller can
//! discard anything a cancelled session still manages to send.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::ChatRequest;
use crate::sse::ProtocolEvent;
use crate::traits::HttpClient;

/// Monotonic per-controller session number.
pub type SessionId = u64;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// `done` frame received or the body ended
    Completed,
    /// Stopped on request. Not an error.
    Cancelled,
    /// Request or transport failure, with a message for the user
    Failed(String),
}

impl Termination {
    pub fn is_error(&self) -> bool {
        matches!(self, Termination::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// A decoded `token` or `sources` event
    Event(ProtocolEvent),
    /// Sent exactly once, last
    Finished(Termination),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionMessage {
    pub session_id: SessionId,
    pub update: SessionUpdate,
}

/// Cancellation handle of a running session.
///
/// Dropping the handle does not cancel the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    token: CancellationToken,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Request cancellation. The session stops reading the body and reports
    /// `Termination::Cancelled`, unless it already finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Start a streaming chat request in the background.
///
/// Returns immediately. The spawned task sends zero or more
/// `SessionUpdate::Event`s followed by exactly one `SessionUpdate::Finished`.
pub fn open_session<H>(
    client: ApiClient<H>,
    request: ChatRequest,
    session_id: SessionId,
    sender: mpsc::UnboundedSender<SessionMessage>,
) -> SessionHandle
where
    H: HttpClient + 'static,
{
    let token = CancellationToken::new();
    let handle = SessionHandle {
        id: session_id,
        token: token.clone(),
    };

    tokio::spawn(async move {
        tracing::info!("Session {} started", session_id);

        let termination = tokio::select! {
            biased;
            _ = token.cancelled() => Termination::Cancelled,
            termination = pump(&client, &request, session_id, &sender) => termination,
        };

        tracing::info!("Session {} finished: {:?}", session_id, termination);
        let _ = sender.send(SessionMessage {
            session_id,
            update: SessionUpdate::Finished(termination),
        });
    });

    handle
}

/// Forward decoded events until the stream ends. Never sends `Finished`.
async fn pump<H: HttpClient>(
    client: &ApiClient<H>,
    request: &ChatRequest,
    session_id: SessionId,
    sender: &mpsc::UnboundedSender<SessionMessage>,
) -> Termination {
    let mut events = match client.stream_chat(request).await {
        Ok(events) => events,
        Err(e) => {
            tracing::debug!("Session {} request failed: {}", session_id, e);
            return Termination::Failed(e.user_message());
        }
    };
    tracing::debug!("Session {} connected", session_id);

    while let Some(item) = events.next().await {
        match item {
            Ok(ProtocolEvent::Done) => return Termination::Completed,
            Ok(event) => {
                let message = SessionMessage {
                    session_id,
                    update: SessionUpdate::Event(event),
                };
                if sender.send(message).is_err() {
                    // Controller is gone, nobody is listening
                    return Termination::Cancelled;
                }
            }
            Err(e) => {
                tracing::debug!("Session {} transport error: {}", session_id, e);
                return Termination::Failed(ApiError::from(e).user_message());
            }
        }
    }

    tracing::debug!("Session {} body ended without done", session_id);
    Termination::Completed
}
