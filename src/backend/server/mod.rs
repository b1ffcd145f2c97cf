//! Server setup: configuration, application state, and initialization.

/// Environment configuration
pub mod config;

/// Application bootstrap
pub mod init;

/// Application state
pub mod state;

pub use config::ServerConfig;
pub use init::{create_app, create_app_with_config};
pub use state::AppState;
