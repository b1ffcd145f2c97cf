/**
 * Error Conversion
 *
 * Converts backend errors into HTTP responses so handlers can return them
 * directly with `?`.
 *
 * # Response Format
 *
 * Errors are returned as JSON:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */
use crate::backend::error::types::BackendError;
use axum::response::{IntoResponse, Json, Response};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed: {} {}", status, message);
        } else {
            tracing::warn!("Request rejected: {} {}", status, message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
