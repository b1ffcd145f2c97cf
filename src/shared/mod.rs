//! Shared Module
//!
//! Types shared between the server and the client relay consumer. These are
//! the wire contract of the relay: topics, change events, the envelope frame
//! format, and the record types carried as payloads.

/// Relay topic names
pub mod topic;

/// Change events and the wire envelope
pub mod event;

/// Trip record row types
pub mod records;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{ChangeEvent, Envelope};
pub use records::{ChatMessage, ItineraryItem, Poll, WellnessMetrics};
pub use topic::Topic;
