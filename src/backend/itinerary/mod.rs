//! Trip itinerary: dated activity entries.

/// Database operations
pub mod db;

/// Route handlers
pub mod handlers;

pub use handlers::{create_item, get_itinerary};
