//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from `lexa::adapters::mock`
//! and provides a builder for the stream responses the chat tests need.

pub use lexa::adapters::mock::{MockHttpClient, MockResponse};
pub use lexa::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Every request receives a body streamed in the given chunks.
    pub fn with_stream(self, chunks: &[&str]) -> Self {
        self.client
            .set_default_response(MockResponse::Stream(to_bytes(chunks)));
        self
    }

    /// Chunks are delivered, then the body never ends.
    pub fn with_hanging_stream(self, chunks: &[&str]) -> Self {
        self.client
            .set_default_response(MockResponse::StreamThenHang(to_bytes(chunks)));
        self
    }

    /// Chunks are delivered, then the connection fails.
    pub fn with_stream_error(self, chunks: &[&str], error: HttpError) -> Self {
        self.client
            .set_default_response(MockResponse::StreamThenError(to_bytes(chunks), error));
        self
    }

    /// Configures a complete response, e.g. a non-2xx answer with a JSON body.
    pub fn with_json_response(self, status: u16, json: &str) -> Self {
        self.client
            .set_default_response(MockResponse::Success(Response::new(
                status,
                Bytes::from(json.to_string()),
            )));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_bytes(chunks: &[&str]) -> Vec<Bytes> {
    chunks
        .iter()
        .map(|c| Bytes::from(c.to_string()))
        .collect()
}
