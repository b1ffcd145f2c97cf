/**
 * Server Initialization
 *
 * Builds the application from configuration: state, router, and the relay's
 * change subscriptions.
 *
 * # Initialization Steps
 *
 * 1. Load configuration from the environment
 * 2. Create the broadcaster and connection registry
 * 3. Load optional services (database pool, auth provider client)
 * 4. Start the per-topic change subscriptions when a database is present
 * 5. Assemble the router
 *
 * The subscription handle is returned alongside the router; the caller
 * owns it for the life of the process, and dropping it stops the topic
 * tasks. There is deliberately no ambient global holding relay state.
 */
use crate::backend::auth::provider::AuthProviderClient;
use crate::backend::relay::broadcaster::Broadcaster;
use crate::backend::relay::registry::ConnectionRegistry;
use crate::backend::relay::subscription::{SubscriptionHandle, SubscriptionManager};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::source::PgChangeSource;
use axum::Router;
use std::sync::Arc;

/// Create the application from environment configuration
///
/// Returns the router and, when a database is configured, the handle to
/// the running change subscriptions.
pub async fn create_app() -> (Router, Option<SubscriptionHandle>) {
    let config = ServerConfig::from_env();
    create_app_with_config(config).await
}

/// Create the application from explicit configuration
pub async fn create_app_with_config(
    config: ServerConfig,
) -> (Router, Option<SubscriptionHandle>) {
    tracing::info!("Initializing TripSync backend server");

    let broadcaster = Broadcaster::with_capacity(config.relay_channel_capacity);
    let registry = ConnectionRegistry::new();

    let db_pool = load_database(&config).await;

    let auth = config.auth_url.as_ref().map(|url| {
        AuthProviderClient::new(url.clone(), config.auth_service_key.clone())
    });
    if auth.is_none() {
        tracing::warn!("AUTH_URL not set. Auth routes will be disabled.");
    }

    // The relay only has something to subscribe to when the store is there.
    let subscriptions = db_pool.as_ref().map(|pool| {
        SubscriptionManager::new(PgChangeSource::new(pool.clone()), broadcaster.clone()).start()
    });
    if subscriptions.is_none() {
        tracing::warn!("No database; relay will broadcast nothing until one is configured.");
    }

    let app_state = AppState {
        broadcaster,
        registry,
        db_pool,
        auth,
        config: Arc::new(config),
    };

    let router = create_router(app_state);
    tracing::info!("Router configured");

    (router, subscriptions)
}
