/**
 * Auth Route Handlers
 *
 * Handlers for the authentication endpoints. All account state lives with
 * the hosted provider; these handlers validate, proxy, and shape responses.
 *
 * # Routes
 *
 * - `POST /api/auth/login` - exchange email/password for a session
 * - `POST /api/auth/logout` - invalidate the caller's session
 * - `GET  /api/auth/user` - current user, from the verified token
 * - `POST /api/admin/create-user` - create an account (admin key required)
 */
use crate::backend::auth::password::validate_password;
use crate::backend::auth::provider::AuthProviderClient;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::server::state::AppState;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use serde::Deserialize;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin create-user request body
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// Fetch the provider client or fail with 503
fn provider(state: &AppState) -> Result<&AuthProviderClient, BackendError> {
    state.auth.as_ref().ok_or_else(|| {
        BackendError::handler(
            StatusCode::SERVICE_UNAVAILABLE,
            "Auth provider not configured",
        )
    })
}

/// Login handler (POST /api/auth/login)
///
/// Proxies the credentials to the hosted provider and returns its session
/// alongside the user object. Invalid credentials surface as 401 without
/// distinguishing unknown users from wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    let session = provider(&state)?
        .sign_in_with_password(&request.email, &request.password)
        .await?;

    let user = session.get("user").cloned().unwrap_or(serde_json::Value::Null);
    Ok(Json(serde_json::json!({
        "session": session,
        "user": user,
    })))
}

/// Logout handler (POST /api/auth/logout)
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, BackendError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            BackendError::handler(StatusCode::UNAUTHORIZED, "No authentication token provided")
        })?;

    provider(&state)?.sign_out(token).await?;
    Ok(Json(serde_json::json!({ "message": "Logged out successfully" })))
}

/// Current-user handler (GET /api/auth/user)
///
/// The auth middleware has already verified the token; this just echoes
/// the identity it attached.
pub async fn get_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user": {
            "id": user.user_id,
            "email": user.email,
        }
    }))
}

/// Admin create-user handler (POST /api/admin/create-user)
///
/// Guarded by the `x-admin-api-key` header rather than a bearer token:
/// accounts are provisioned by the trip organizer's tooling, not by users.
/// The password policy is enforced here so the provider never sees a
/// password the application would not accept.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let expected = state.config.admin_api_key.as_deref().ok_or_else(|| {
        BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Admin API key not configured")
    })?;
    let presented = headers
        .get("x-admin-api-key")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    if presented != expected {
        return Err(BackendError::handler(
            StatusCode::UNAUTHORIZED,
            "Unauthorized: Invalid admin API key",
        ));
    }

    if let Err(rule_errors) = validate_password(&request.password) {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("Invalid password: {}", rule_errors.join("; ")),
        ));
    }

    let user = provider(&state)?
        .create_user(&request.email, &request.password)
        .await?;

    tracing::info!("User created: {}", request.email);
    Ok(Json(serde_json::json!({
        "message": "User created successfully",
        "user": user,
    })))
}
