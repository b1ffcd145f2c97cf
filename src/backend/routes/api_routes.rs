/**
 * API Route Handlers
 *
 * Configures the public (unauthenticated) API routes:
 *
 * - `GET  /health` - liveness probe
 * - `POST /api/auth/login` - session sign-in via the hosted provider
 * - `POST /api/admin/create-user` - account creation, guarded by the
 *   `x-admin-api-key` header instead of a bearer token
 */
use crate::backend::auth::{create_user, login};
use crate::backend::server::state::AppState;
use axum::{response::Json, Router};

/// Liveness probe (GET /health)
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Add the public API routes to the router
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/health", axum::routing::get(health))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/admin/create-user", axum::routing::post(create_user))
}
