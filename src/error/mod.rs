//! Error types for the Lexa client.
//!
//! - **`ApiError`**: failures talking to the service, with a human-readable
//!   `user_message()` for the conversation error slot
//! - **`ErrorCategory`**: coarse classification for retry hints
//!
//! Transport failures (`HttpError`) live next to the HTTP seam in
//! `crate::traits`; malformed stream payloads (`SseParseError`) in
//! `crate::sse`. Neither escapes the streaming pipeline on its own.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, IO | Yes |
//! | Server | Non-2xx answers | 5xx, 408, 429 |
//! | Client | Unexpected payloads | No |

mod api;
mod category;

pub use api::ApiError;
pub use category::ErrorCategory;
