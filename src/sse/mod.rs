//! Frame decoder for the chat streaming endpoint.
//!
//! The service frames its answer as newline-delimited records:
//! - `event: <name>` - sets the current event name
//! - `data: <payload>` - payload for the current event name
//! - Empty line - resets the current event name
//!
//! Anything else is ignored. Recognized event names are `token`, `sources`
//! and `done`.
//!
//! # Module structure
//! - `events` - `ProtocolEvent`, `SseLine`, `SseParseError`
//! - `parser` - record classification and the per-record state machine
//! - `decoder` - byte chunk buffering and UTF-8 reassembly
//! - `stream` - adapter from a byte stream to an event stream

mod decoder;
mod events;
mod parser;
mod stream;

pub use decoder::FrameDecoder;
pub use events::{ProtocolEvent, SseLine, SseParseError};
pub use parser::{parse_sse_event, parse_sse_line, SseParser};
pub use stream::{decode_stream, EventStream};
