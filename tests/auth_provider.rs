//! Auth provider client tests against a mocked provider API.

use tripsync::backend::auth::provider::AuthProviderClient;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sign_in_returns_the_provider_session() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(query_param("grant_type", "password"))
        .and(body_partial_json(serde_json::json!({"email": "kia@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-goes-here",
            "token_type": "bearer",
            "user": {"id": "u-1", "email": "kia@example.com"}
        })))
        .mount(&provider)
        .await;

    let client = AuthProviderClient::new(provider.uri(), None);
    let session = client
        .sign_in_with_password("kia@example.com", "Str0ng!pass")
        .await
        .unwrap();

    assert_eq!(session["access_token"], "jwt-goes-here");
    assert_eq!(session["user"]["email"], "kia@example.com");
}

#[tokio::test]
async fn bad_credentials_collapse_to_unauthorized() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error_description": "Invalid login credentials"
        })))
        .mount(&provider)
        .await;

    let client = AuthProviderClient::new(provider.uri(), None);
    let error = client
        .sign_in_with_password("kia@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 401);
}

#[tokio::test]
async fn provider_outage_maps_to_bad_gateway() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "msg": "internal error"
        })))
        .mount(&provider)
        .await;

    let client = AuthProviderClient::new(provider.uri(), None);
    let error = client
        .sign_in_with_password("kia@example.com", "Str0ng!pass")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 502);
}

#[tokio::test]
async fn create_user_uses_the_service_key() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/users"))
        .and(header("authorization", "Bearer service-key"))
        .and(body_partial_json(
            serde_json::json!({"email": "new@example.com", "email_confirm": true}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "u-2",
            "email": "new@example.com"
        })))
        .mount(&provider)
        .await;

    let client = AuthProviderClient::new(provider.uri(), Some("service-key".to_string()));
    let user = client
        .create_user("new@example.com", "Str0ng!pass")
        .await
        .unwrap();
    assert_eq!(user["id"], "u-2");
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "msg": "User already registered"
        })))
        .mount(&provider)
        .await;

    let client = AuthProviderClient::new(provider.uri(), Some("service-key".to_string()));
    let error = client
        .create_user("dup@example.com", "Str0ng!pass")
        .await
        .unwrap_err();
    assert_eq!(error.status_code(), 409);
}

#[tokio::test]
async fn create_user_without_service_key_is_unavailable() {
    let client = AuthProviderClient::new("http://127.0.0.1:1", None);
    let error = client
        .create_user("new@example.com", "Str0ng!pass")
        .await
        .unwrap_err();
    assert_eq!(error.status_code(), 503);
}
