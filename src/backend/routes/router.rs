/**
 * Router Configuration
 *
 * Combines all route groups into the single Axum router.
 *
 * # Route Groups
 *
 * 1. Relay: `GET /ws` WebSocket upgrade (its own auth policy, see the
 *    relay socket module)
 * 2. Public API: health, login, admin user creation
 * 3. Protected API: trip CRUD and session routes, behind the bearer-token
 *    middleware
 *
 * CORS is permissive (the browser client is served from a different
 * origin) and tracing wraps the lot.
 */
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::relay::socket::ws_handler;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use axum::{middleware, routing, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // Trip CRUD and session routes require a signed-in user.
    let protected = Router::new()
        .route(
            "/api/chat/messages",
            routing::get(crate::backend::chat::get_messages)
                .post(crate::backend::chat::post_message),
        )
        .route(
            "/api/wellness/metrics",
            routing::get(crate::backend::wellness::get_metrics)
                .put(crate::backend::wellness::put_metrics),
        )
        .route(
            "/api/itinerary",
            routing::get(crate::backend::itinerary::get_itinerary)
                .post(crate::backend::itinerary::create_item),
        )
        .route(
            "/api/polls",
            routing::get(crate::backend::polls::get_polls)
                .post(crate::backend::polls::create_poll),
        )
        .route("/api/polls/{id}/vote", routing::post(crate::backend::polls::vote))
        .route("/api/auth/user", routing::get(crate::backend::auth::get_user))
        .route("/api/auth/logout", routing::post(crate::backend::auth::logout))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let router = Router::new().route("/ws", routing::get(ws_handler));
    let router = configure_api_routes(router);

    router
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .with_state(app_state)
}
