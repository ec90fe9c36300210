//! Common test utilities for integration tests.
//!
//! Frame builders for the chat stream wire format and a controller
//! factory backed by the mock HTTP client.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use lexa::api::ApiClient;
use lexa::chat::{ChatController, ChatUpdate};
use lexa::settings::Settings;

pub const BASE_URL: &str = "http://lexa.test";

/// `event: token` frame.
pub fn token_frame(text: &str) -> String {
    format!("event: token\ndata: {}\n\n", text)
}

/// `event: sources` frame with the given JSON payload.
pub fn sources_frame(json: &str) -> String {
    format!("event: sources\ndata: {}\n\n", json)
}

pub fn done_frame() -> String {
    "event: done\ndata: \n\n".to_string()
}

/// A typical answer: sources first, then tokens, then done.
pub fn answer_body(tokens: &[&str]) -> String {
    let mut body = sources_frame(SOURCES_JSON);
    for token in tokens {
        body.push_str(&token_frame(token));
    }
    body.push_str(&done_frame());
    body
}

pub const SOURCES_JSON: &str = r#"[{"id":"stgb-32","content":"Notwehr ist die Verteidigung, die erforderlich ist, um einen gegenwärtigen rechtswidrigen Angriff von sich oder einem anderen abzuwenden.","similarity":0.873,"metadata":{"law":"StGB"},"source_display":"StGB § 32"},{"id":"bgb-227","content":"Eine durch Notwehr gebotene Handlung ist nicht widerrechtlich.","similarity":0.641,"metadata":{},"source_display":"BGB § 227"}]"#;

/// Controller talking to the given mock.
pub fn controller(mock: &MockHttpClient) -> ChatController<MockHttpClient> {
    ChatController::new(ApiClient::new(BASE_URL, mock.clone()), Settings::default())
}

/// Receive updates until the active session is finished.
pub async fn run_to_end<H>(chat: &mut ChatController<H>) -> Vec<ChatUpdate>
where
    H: lexa::traits::HttpClient + 'static,
{
    let mut updates = Vec::new();
    while let Some(update) = chat.recv().await {
        updates.push(update);
    }
    updates
}
