//! Record-level parsing.
//!
//! Contains the stateful `SseParser` that tracks the current event name and
//! turns payload records into `ProtocolEvent`s.

use crate::models::SourceDocument;
use crate::sse::events::{ProtocolEvent, SseLine, SseParseError};

const EVENT_PREFIX: &str = "event: ";
const DATA_PREFIX: &str = "data: ";

/// Classify a single record (without its line terminator).
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest.to_string());
    }

    SseLine::Other(line.to_string())
}

/// Turn an event name and its payload into a typed event.
///
/// Returns `Ok(None)` for names the client does not handle.
pub fn parse_sse_event(event_type: &str, data: &str) -> Result<Option<ProtocolEvent>, SseParseError> {
    match event_type {
        "token" => Ok(Some(ProtocolEvent::Token(data.to_string()))),
        "sources" => serde_json::from_str::<Vec<SourceDocument>>(data)
            .map(|sources| Some(ProtocolEvent::Sources(sources)))
            .map_err(|e| SseParseError::InvalidJson {
                event_type: event_type.to_string(),
                reason: e.to_string(),
            }),
        // The name alone completes the stream; its payload carries nothing.
        "done" => Ok(Some(ProtocolEvent::Done)),
        _ => Ok(None),
    }
}

/// Stateful parser fed one record at a time.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Event name set by the last `event:` record, empty when unset
    current_event: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a record to the parser, potentially returning an event.
    ///
    /// Returns:
    /// - `Ok(Some(event))` - the record completed an event
    /// - `Ok(None)` - the record was consumed without producing an event
    /// - `Err(error)` - the payload was malformed; the parser stays usable
    pub fn feed_line(&mut self, line: &str) -> Result<Option<ProtocolEvent>, SseParseError> {
        match parse_sse_line(line) {
            SseLine::Event(name) => {
                let done = name == "done";
                self.current_event = name;
                if done {
                    return Ok(Some(ProtocolEvent::Done));
                }
                Ok(None)
            }
            SseLine::Data(payload) => {
                let event_type = std::mem::take(&mut self.current_event);
                if event_type == "done" {
                    // Already completed on the `event: done` record
                    return Ok(None);
                }
                parse_sse_event(&event_type, &payload)
            }
            SseLine::Empty => {
                self.current_event.clear();
                Ok(None)
            }
            SseLine::Other(_) => Ok(None),
        }
    }

    /// Name of the event the next payload belongs to, if any.
    pub fn current_event(&self) -> Option<&str> {
        if self.current_event.is_empty() {
            None
        } else {
            Some(&self.current_event)
        }
    }
}
