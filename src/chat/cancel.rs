//! Stopping and clearing the conversation.

use super::controller::ChatController;
use super::session::Termination;
use crate::traits::HttpClient;

impl<H: HttpClient + 'static> ChatController<H> {
    /// Stop the active session, keeping the partial answer.
    ///
    /// Events the session already queued are applied first, then the session
    /// is cancelled and the message finalized as cancelled (normalized, no
    /// error). Does nothing when idle. Returns `true` if a session was stopped.
    pub fn stop(&mut self) -> bool {
        // A queued `Finished` may end the session during the drain
        self.drain();

        let Some(handle) = self.active.as_ref() else {
            return false;
        };
        tracing::info!("Stopping session {}", handle.id());
        handle.cancel();

        self.finish_active(Termination::Cancelled);
        true
    }

    /// Start over: stop any active session, then drop all messages.
    ///
    /// Messages the stopped session sends afterwards are discarded by
    /// session id and never touch the cleared list.
    pub fn clear(&mut self) {
        self.stop();
        self.state.clear();
    }
}
