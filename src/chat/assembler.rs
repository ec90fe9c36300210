//! Event application.
//!
//! The only code that mutates message content. Every transition targets the
//! last message and only while it is streaming, so events that arrive after
//! finalization (or after a clear) fall through as `Applied::Ignored`.

use super::session::Termination;
use super::state::ConversationState;
use crate::normalize::normalize;
use crate::sse::ProtocolEvent;

/// What an event did to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Token appended to the streaming message
    Token,
    /// Sources attached (count)
    Sources(usize),
    /// Streaming message finalized
    Finished,
    /// Nothing was streaming
    Ignored,
}

/// Apply a decoded event to the streaming assistant message.
pub fn apply_event(state: &mut ConversationState, event: ProtocolEvent) -> Applied {
    if event == ProtocolEvent::Done {
        return if finish(state, &Termination::Completed) {
            Applied::Finished
        } else {
            Applied::Ignored
        };
    }

    let Some(message) = state.streaming_message_mut() else {
        tracing::debug!("Ignoring {} event, no message is streaming", event.event_type_name());
        return Applied::Ignored;
    };

    match event {
        ProtocolEvent::Token(text) => {
            message.append_token(&text);
            Applied::Token
        }
        ProtocolEvent::Sources(sources) => {
            let count = sources.len();
            message.sources = Some(sources);
            Applied::Sources(count)
        }
        ProtocolEvent::Done => Applied::Ignored,
    }
}

/// Finalize the streaming message.
///
/// Completion and cancellation normalize the content; failure keeps the
/// partial content as is and records the error. Returns `false` if nothing
/// was streaming, so calling it twice never normalizes twice.
pub fn finish(state: &mut ConversationState, termination: &Termination) -> bool {
    let Some(message) = state.streaming_message_mut() else {
        return false;
    };

    match termination {
        Termination::Completed | Termination::Cancelled => {
            message.content = normalize(&message.content);
            message.streaming = false;
        }
        Termination::Failed(error) => {
            message.streaming = false;
            state.set_error(error.clone());
        }
    }
    state.end_streaming();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceDocument;

    fn token(text: &str) -> ProtocolEvent {
        ProtocolEvent::Token(text.to_string())
    }

    fn streaming_state() -> ConversationState {
        let mut state = ConversationState::new();
        state.begin_exchange("Ist der Vertrag gültig?");
        state
    }

    #[test]
    fn test_tokens_applied_in_order() {
        let mut state = streaming_state();
        for t in ["Der ", "Vert", "rag ", "ist ", "gültig."] {
            assert_eq!(apply_event(&mut state, token(t)), Applied::Token);
        }
        assert_eq!(apply_event(&mut state, ProtocolEvent::Done), Applied::Finished);

        let last = state.last().unwrap();
        assert_eq!(last.content, "Der Vertrag ist gültig.");
        assert!(!last.streaming);
        assert!(!state.is_streaming());
    }

    #[test]
    fn test_sources_attached() {
        let mut state = streaming_state();
        let source = SourceDocument {
            id: "1".to_string(),
            content: "Text".to_string(),
            similarity: 0.8,
            metadata: Default::default(),
            source_display: "BGB § 145".to_string(),
        };
        assert_eq!(
            apply_event(&mut state, ProtocolEvent::Sources(vec![source])),
            Applied::Sources(1)
        );
        assert_eq!(state.last().unwrap().source_count(), 1);
    }

    #[test]
    fn test_completion_normalizes() {
        let mut state = streaming_state();
        apply_event(&mut state, token("Die Haft ung nach B GB"));
        assert!(finish(&mut state, &Termination::Completed));
        assert_eq!(state.last().unwrap().content, "Die Haftung nach BGB");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_cancel_normalizes_without_error() {
        let mut state = streaming_state();
        apply_event(&mut state, token("** teil"));
        apply_event(&mut state, token("weise **"));
        assert!(finish(&mut state, &Termination::Cancelled));

        let last = state.last().unwrap();
        assert_eq!(last.content, "**teilweise**");
        assert!(!last.streaming);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_keeps_partial_content_raw() {
        let mut state = streaming_state();
        apply_event(&mut state, token("Haft ung "));
        assert!(finish(
            &mut state,
            &Termination::Failed("Verbindung verloren".to_string())
        ));

        let last = state.last().unwrap();
        assert_eq!(last.content, "Haft ung ");
        assert!(!last.streaming);
        assert_eq!(state.error(), Some("Verbindung verloren"));
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut state = streaming_state();
        apply_event(&mut state, token("Art . 5"));
        assert!(finish(&mut state, &Termination::Completed));
        let content = state.last().unwrap().content.clone();

        assert!(!finish(&mut state, &Termination::Completed));
        assert!(!finish(&mut state, &Termination::Failed("spät".to_string())));
        assert_eq!(state.last().unwrap().content, content);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_events_after_finish_ignored() {
        let mut state = streaming_state();
        apply_event(&mut state, ProtocolEvent::Done);
        assert_eq!(apply_event(&mut state, token("spät")), Applied::Ignored);
        assert_eq!(apply_event(&mut state, ProtocolEvent::Done), Applied::Ignored);
        assert!(state.last().unwrap().content.is_empty());
    }

    #[test]
    fn test_events_on_empty_state_ignored() {
        let mut state = ConversationState::new();
        assert_eq!(apply_event(&mut state, token("x")), Applied::Ignored);
        assert!(state.is_empty());
    }
}
