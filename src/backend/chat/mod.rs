//! Group chat: message history and sending.
//!
//! Real-time delivery is not handled here; the insert trigger feeds the
//! relay's `message` topic.

/// Database operations
pub mod db;

/// Route handlers
pub mod handlers;

pub use handlers::{get_messages, post_message};
