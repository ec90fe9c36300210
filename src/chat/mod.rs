//! Streaming chat: conversation state, event application and sessions.
//!
//! - `state` - `ConversationState`, the message list the UI renders
//! - `assembler` - applies decoded events and terminal signals to the state
//! - `session` - one streaming request running on its own task
//! - `controller` - `ChatController`, the conversation-level API
//! - `cancel` - stop and clear

mod assembler;
mod cancel;
mod controller;
mod session;
mod state;

pub use assembler::{apply_event, finish, Applied};
pub use controller::{ChatController, ChatUpdate, RejectReason, SendOutcome};
pub use session::{
    open_session, SessionHandle, SessionId, SessionMessage, SessionUpdate, Termination,
};
pub use state::ConversationState;
