/**
 * Application State Management
 *
 * Defines the application state container and the `FromRef` extractions
 * Axum handlers use to pull out just the pieces they need.
 *
 * # Thread Safety
 *
 * Everything here is cheaply cloneable and shared: the broadcaster and
 * registry clone their channel/map handles, the pool is internally
 * reference-counted, and the config is behind an `Arc`.
 */
use crate::backend::auth::provider::AuthProviderClient;
use crate::backend::relay::broadcaster::Broadcaster;
use crate::backend::relay::registry::ConnectionRegistry;
use crate::backend::server::config::ServerConfig;
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

/// Central state container for the Axum application
///
/// Constructed once at startup and cloned into every handler. The
/// broadcaster and registry are the relay's shared surfaces; the pool and
/// auth client are optional services that may be absent on a given
/// deployment.
#[derive(Clone)]
pub struct AppState {
    /// Fan-out channel for relay frames
    pub broadcaster: Broadcaster,

    /// Live relay connection membership
    pub registry: ConnectionRegistry,

    /// Database connection pool
    ///
    /// `None` when `DATABASE_URL` is not configured. Handlers check for
    /// `None` and answer 503 rather than panicking.
    pub db_pool: Option<PgPool>,

    /// Hosted auth provider client
    ///
    /// `None` when `AUTH_URL` is not configured.
    pub auth: Option<AuthProviderClient>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build a state container with no external services
    ///
    /// Used by tests and database-less development runs: the relay works,
    /// the CRUD and auth routes answer 503.
    pub fn standalone(config: ServerConfig) -> Self {
        Self {
            broadcaster: Broadcaster::with_capacity(config.relay_channel_capacity),
            registry: ConnectionRegistry::new(),
            db_pool: None,
            auth: None,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
