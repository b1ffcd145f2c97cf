//! Group polls: creation and voting.

/// Database operations
pub mod db;

/// Route handlers
pub mod handlers;

pub use handlers::{create_poll, get_polls, vote};
