//! Backend Module
//!
//! All server-side code for TripSync: the real-time relay, the REST CRUD
//! layer over the trip records, and the auth passthrough to the hosted
//! provider.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs         - Module exports
//! ├── server/        - Configuration, state, initialization
//! ├── routes/        - Router assembly
//! ├── relay/         - Real-time fan-out (the core)
//! ├── source/        - Change-notification sources
//! ├── chat/          - Chat message CRUD
//! ├── wellness/      - Wellness metrics CRUD
//! ├── polls/         - Poll CRUD and voting
//! ├── itinerary/     - Itinerary CRUD
//! ├── auth/          - Password policy, tokens, provider client
//! ├── middleware/    - Bearer-token middleware
//! └── error/         - Backend error types
//! ```
//!
//! # Data Flow
//!
//! A CRUD handler writes a row → the row trigger notifies the change
//! source → the subscription manager builds a change event → the
//! broadcaster fans it out to every connected WebSocket. The CRUD layer
//! and the relay never call each other directly; the store is the only
//! coupling between them.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time relay
pub mod relay;

/// Change-notification sources
pub mod source;

/// Chat message CRUD
pub mod chat;

/// Wellness metrics CRUD
pub mod wellness;

/// Polls CRUD and voting
pub mod polls;

/// Itinerary CRUD
pub mod itinerary;

/// Authentication
pub mod auth;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use relay::{Broadcaster, ConnectionRegistry, SubscriptionHandle, SubscriptionManager};
pub use server::{create_app, AppState, ServerConfig};
