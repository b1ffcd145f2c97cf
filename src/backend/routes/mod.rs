//! Route Configuration Module
//!
//! Assembles the HTTP surface of the server: the relay WebSocket endpoint,
//! the public API routes, and the token-protected trip CRUD routes.

/// Main router creation
pub mod router;

/// Public API endpoint handlers
pub mod api_routes;

pub use router::create_router;
