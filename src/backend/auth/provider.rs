/**
 * Hosted Auth Provider Client
 *
 * Thin HTTP client for the managed auth provider. The server never stores
 * credentials or sessions itself; sign-in and account creation are proxied
 * to the provider and its responses passed back to the caller.
 *
 * # Endpoints Used
 *
 * - `POST {base}/token?grant_type=password` - password sign-in
 * - `POST {base}/logout` - session sign-out
 * - `POST {base}/admin/users` - account creation (service key required)
 */
use crate::backend::error::BackendError;
use axum::http::StatusCode;

/// Client for the hosted auth provider's HTTP API
#[derive(Clone)]
pub struct AuthProviderClient {
    http: reqwest::Client,
    base_url: String,
    service_key: Option<String>,
}

impl AuthProviderClient {
    /// Create a client for the provider at `base_url`
    ///
    /// `service_key` is the provider's privileged key, required only for
    /// the admin account-creation call.
    pub fn new(base_url: impl Into<String>, service_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key,
        }
    }

    /// Exchange email and password for a provider session
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, BackendError> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::provider(format!("Auth provider unreachable: {}", e)))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::provider(format!("Invalid provider response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }

        // The provider reports bad credentials as a client error; collapse
        // those to 401 so callers cannot distinguish unknown users from
        // wrong passwords.
        if status.is_client_error() {
            return Err(BackendError::provider_status(
                StatusCode::UNAUTHORIZED,
                "Invalid credentials",
            ));
        }
        Err(BackendError::provider_status(
            StatusCode::BAD_GATEWAY,
            provider_message(&body),
        ))
    }

    /// Invalidate the session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = format!("{}/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| BackendError::provider(format!("Auth provider unreachable: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::provider_status(
                StatusCode::BAD_GATEWAY,
                format!("Sign-out failed: {}", response.status()),
            ))
        }
    }

    /// Create an account through the provider's admin API
    ///
    /// The account is created with the email pre-confirmed, matching how
    /// trip members are onboarded by an organizer rather than self-signup.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, BackendError> {
        let service_key = self.service_key.as_deref().ok_or_else(|| {
            BackendError::handler(
                StatusCode::SERVICE_UNAVAILABLE,
                "Auth provider service key not configured",
            )
        })?;

        let url = format!("{}/admin/users", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(|e| BackendError::provider(format!("Auth provider unreachable: {}", e)))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::provider(format!("Invalid provider response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }
        if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::CONFLICT {
            return Err(BackendError::provider_status(
                StatusCode::CONFLICT,
                "Email already registered",
            ));
        }
        Err(BackendError::provider_status(
            StatusCode::BAD_GATEWAY,
            provider_message(&body),
        ))
    }
}

/// Pull the most useful message out of a provider error body
fn provider_message(body: &serde_json::Value) -> String {
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            return text.to_string();
        }
    }
    "Unexpected auth provider error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AuthProviderClient::new("http://auth.local/auth/v1/", None);
        assert_eq!(client.base_url, "http://auth.local/auth/v1");
    }

    #[test]
    fn test_provider_message_extraction() {
        assert_eq!(
            provider_message(&json!({"error_description": "bad grant"})),
            "bad grant"
        );
        assert_eq!(provider_message(&json!({"msg": "nope"})), "nope");
        assert_eq!(
            provider_message(&json!({"unrelated": 1})),
            "Unexpected auth provider error"
        );
    }
}
