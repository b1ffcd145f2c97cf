//! Authentication Module
//!
//! Authentication is delegated to the hosted provider: accounts, sessions,
//! and credential storage all live there. This module carries the pieces
//! the server still owns: the password policy, local verification of the
//! provider's bearer tokens, the provider HTTP client, and the auth route
//! handlers.

/// Password policy validation
pub mod password;

/// Bearer token verification
pub mod tokens;

/// Hosted provider HTTP client
pub mod provider;

/// Auth route handlers
pub mod handlers;

pub use handlers::{create_user, get_user, login, logout};
pub use provider::AuthProviderClient;
pub use tokens::{verify_token, Claims};
