//! Adapter from a transport byte stream to a protocol event stream.

use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use crate::sse::decoder::FrameDecoder;
use crate::sse::events::ProtocolEvent;
use crate::traits::{ByteStream, HttpError};

/// Lazily decoded events, in wire order.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ProtocolEvent, HttpError>> + Send>>;

struct DecodeState {
    bytes: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<ProtocolEvent>,
    exhausted: bool,
}

/// Decode `bytes` into protocol events.
///
/// The returned stream ends after `Done`, after the transport ends, or after
/// yielding a transport error, whichever comes first.
pub fn decode_stream(bytes: ByteStream) -> EventStream {
    let state = DecodeState {
        bytes,
        decoder: FrameDecoder::new(),
        ready: VecDeque::new(),
        exhausted: false,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                if event == ProtocolEvent::Done {
                    // Nothing may follow the terminal event
                    state.ready.clear();
                    state.exhausted = true;
                }
                return Some((Ok(event), state));
            }

            if state.exhausted {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let decoded = state.decoder.push(&chunk);
                    state.ready.extend(decoded);
                }
                Some(Err(e)) => {
                    state.exhausted = true;
                    return Some((Err(e), state));
                }
                None => {
                    let decoded = state.decoder.finish();
                    state.ready.extend(decoded);
                    state.exhausted = true;
                }
            }
        }
    });

    Box::pin(events)
}
