//! Real-time Relay Module
//!
//! The core of the server: subscribe to per-topic change streams and fan
//! each event out to every connected WebSocket client.
//!
//! # Architecture
//!
//! ```text
//! relay/
//! ├── mod.rs           - Module exports
//! ├── broadcaster.rs   - Serialize-once fan-out over a broadcast channel
//! ├── registry.rs      - Live connection membership
//! ├── subscription.rs  - Per-topic change subscriptions with backoff
//! └── socket.rs        - WebSocket endpoint and per-connection tasks
//! ```
//!
//! Data flow: a write commits in the store → the change source notifies →
//! the subscription manager builds a `ChangeEvent` → the broadcaster
//! serializes it once and hands the frame to every connection task → each
//! task pushes the frame down its socket.
//!
//! # Delivery Contract
//!
//! At-most-once per connected socket, per-topic order preserved, no replay
//! for clients that were disconnected. Clients are expected to re-fetch
//! full state through the REST layer after a reconnect.

/// Event fan-out
pub mod broadcaster;

/// Connection membership
pub mod registry;

/// WebSocket endpoint
pub mod socket;

/// Per-topic change subscriptions
pub mod subscription;

// Re-export commonly used types
pub use broadcaster::{Broadcaster, RelayFrame};
pub use registry::{ConnectionId, ConnectionRegistry};
pub use socket::ws_handler;
pub use subscription::{SubscriptionHandle, SubscriptionManager};
