//! Data model shared by the streaming pipeline and the API client.
//!
//! - `message` - conversation messages as held in client state
//! - `source` - retrieved source documents cited by answers
//! - `request` - request payloads sent to the service
//! - `response` - response payloads of the non-streaming endpoints

mod message;
mod request;
mod response;
mod source;

pub use message::{ChatMessage, Role};
pub use request::{ChatRequest, HistoryEntry, SearchRequest};
pub use response::{ChatResponse, ErrorResponse, HealthResponse, ReadinessResponse, SearchResponse};
pub use source::{SourceDocument, SOURCE_PREVIEW_CHARS};
