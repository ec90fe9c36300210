//! Lexa - terminal client for a retrieval-augmented legal assistant.
//!
//! The library holds the streaming chat pipeline: frame decoding (`sse`),
//! answer repair (`normalize`), and conversation state driven by streaming
//! sessions (`chat`). The binary in `main.rs` is a thin CLI on top.

pub mod adapters;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod settings;
pub mod sse;
pub mod traits;
