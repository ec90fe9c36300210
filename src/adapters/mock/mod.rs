//! Mock implementations for testing.
//!
//! Enables testing the API client and the chat controller without network
//! access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
