//! Byte-chunk reassembly.
//!
//! Transport chunks carry no alignment guarantees: a chunk may end in the
//! middle of a record, a record prefix, or a multi-byte UTF-8 sequence.
//! `FrameDecoder` owns both the undecoded tail bytes and the partial-line
//! buffer, so every record is processed exactly once no matter how the
//! stream was split.

use crate::sse::events::ProtocolEvent;
use crate::sse::parser::SseParser;

/// Incremental decoder from raw bytes to protocol events.
///
/// All methods take `&mut self`; one decoder serves exactly one stream.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    parser: SseParser,
    /// Bytes of an incomplete UTF-8 sequence at the end of the last chunk
    pending: Vec<u8>,
    /// Decoded text not yet terminated by a newline
    buffer: String,
    /// Set once `Done` has been produced
    terminated: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `done` event has been decoded.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Feed one transport chunk, returning the events completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<ProtocolEvent> {
        if self.terminated {
            return Vec::new();
        }
        self.decode_utf8(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.process_line(&line[..pos], &mut events);
            if self.terminated {
                self.buffer.clear();
                break;
            }
        }
        events
    }

    /// Signal end of input. Any residual text is processed as a final record.
    pub fn finish(&mut self) -> Vec<ProtocolEvent> {
        let mut events = Vec::new();
        if self.terminated {
            return events;
        }

        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.process_line(&line, &mut events);
        }
        events
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<ProtocolEvent>) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match self.parser.feed_line(line) {
            Ok(Some(event)) => {
                if event == ProtocolEvent::Done {
                    self.terminated = true;
                }
                events.push(event);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Dropping malformed frame: {}", e);
            }
        }
    }

    /// Append `chunk` to the text buffer, holding back a trailing partial
    /// code point. Invalid sequences decode to U+FFFD.
    fn decode_utf8(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);

        let mut consumed = 0;
        while consumed < self.pending.len() {
            match std::str::from_utf8(&self.pending[consumed..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    consumed = self.pending.len();
                }
                Err(e) => {
                    let valid_end = consumed + e.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.pending[consumed..valid_end]));
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            consumed = valid_end + len;
                        }
                        None => {
                            // Incomplete sequence at the end, wait for more bytes
                            consumed = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..consumed);
    }
}

/// Decode a complete sequence of chunks in one go.
#[cfg(test)]
pub(crate) fn decode_all<'a, I>(chunks: I) -> Vec<ProtocolEvent>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut decoder = FrameDecoder::new();
    let mut events = Vec::new();
    for chunk in chunks {
        events.extend(decoder.push(chunk));
    }
    events.extend(decoder.finish());
    events
}
