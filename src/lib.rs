//! TripSync - Main Library
//!
//! TripSync is the backend and client-relay library for a group-trip
//! coordination application: group chat, polls, wellness tracking, and a
//! shared itinerary, kept live across every member's screen.
//!
//! # Overview
//!
//! The heart of the system is the **real-time relay**: the server
//! subscribes to per-topic change streams from the data store and fans
//! every committed write out to all connected WebSocket clients. Around it
//! sits a thin REST CRUD layer (whose writes are what feed the relay, via
//! database notify triggers) and an auth passthrough to the hosted
//! identity provider.
//!
//! # Module Structure
//!
//! - **`shared`** - The wire contract: topics, change events, the envelope
//!   frame format, and the trip record types
//! - **`backend`** - The Axum server: relay, change sources, CRUD routes,
//!   auth
//! - **`client`** - The relay consumer: one persistent connection, topic
//!   dispatch, and an indefinite reconnect loop
//!
//! # Delivery Semantics
//!
//! The relay is intentionally modest: at-most-once delivery per connected
//! socket, per-topic ordering, no cross-topic ordering, and no replay for
//! clients that were disconnected. Clients re-fetch full state through the
//! REST layer after a reconnect; the consumer exposes connection-state
//! transitions so its owner knows when.

/// Shared types and wire contract
pub mod shared;

/// Backend server
pub mod backend;

/// Client relay consumer
pub mod client;
