//! Conversation memory
//!
//! - In-memory, per-user turn log with bounded retention
//! - Context windowing for replaying prior turns to the model

pub mod context;
mod store;
pub mod types;

pub use context::{context_from_turns, truncate_front, window};
pub use store::ConversationStore;
pub use types::{format_timestamp, ContextMessage, Role, RoleError, Turn};
