/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. Extracts the bearer token
 * from the Authorization header, verifies it against the provider's shared
 * signing secret, and attaches the authenticated identity to the request
 * extensions for handlers that want it.
 */
use crate::backend::auth::tokens::verify_token;
use crate::backend::server::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};

/// Authenticated user data extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: Option<String>,
}

/// Authentication middleware
///
/// Returns 401 when the token is missing or invalid, and 503 when the
/// deployment has no signing secret configured (auth cannot work at all).
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let secret = state.config.auth_jwt_secret.as_deref().ok_or_else(|| {
        tracing::error!("AUTH_JWT_SECRET not configured; cannot verify tokens");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let claims = verify_token(secret, token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
