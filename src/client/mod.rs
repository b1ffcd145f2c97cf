//! Client Module
//!
//! The client-side relay consumer: a persistent WebSocket connection to
//! the server's `/ws` endpoint, per-topic dispatch of incoming envelopes,
//! and an indefinite reconnect loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use tripsync::client::{ClientConfig, RelayConsumer, TopicHandlers};
//! use tripsync::shared::Topic;
//!
//! # async fn example() {
//! let handlers = TopicHandlers::new()
//!     .on(Topic::Message, |payload| {
//!         println!("chat: {}", payload);
//!     });
//!
//! let consumer = RelayConsumer::spawn(
//!     ClientConfig::new("ws://localhost:3001/ws"),
//!     handlers,
//! );
//!
//! // ... later, on teardown:
//! consumer.shutdown().await;
//! # }
//! ```

/// Consumer configuration and retry policy
pub mod config;

/// The consumer connection loop
pub mod consumer;

/// Per-topic handler dispatch
pub mod dispatch;

pub use config::{ClientConfig, RetryPolicy};
pub use consumer::{ConnectionState, RelayConsumer};
pub use dispatch::TopicHandlers;
