//! REST surface tests over a live server, exercising the route guards and
//! the degraded (service-less) behavior: protected routes demand a bearer
//! token, and routes whose backing service is absent answer 503 rather
//! than crashing.

mod common;

use common::{issue_token, TestServer, TEST_JWT_SECRET};
use pretty_assertions::assert_eq;
use tripsync::backend::server::config::ServerConfig;

fn configured_server() -> TestServer {
    let config = ServerConfig {
        auth_jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        admin_api_key: Some("test-admin-key".to_string()),
        ..ServerConfig::default()
    };
    TestServer::spawn_with_config("127.0.0.1:0".parse().unwrap(), config)
}

#[tokio::test]
async fn health_answers_ok() {
    let server = configured_server();
    let response = reqwest::get(server.http_url("/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = configured_server();
    let client = reqwest::Client::new();

    for path in [
        "/api/chat/messages",
        "/api/wellness/metrics",
        "/api/itinerary",
        "/api/polls",
    ] {
        let response = client.get(server.http_url(path)).send().await.unwrap();
        assert_eq!(response.status(), 401, "expected 401 for {}", path);
    }
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let server = configured_server();
    let client = reqwest::Client::new();
    let response = client
        .get(server.http_url("/api/chat/messages"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn valid_token_without_database_answers_503() {
    let server = configured_server();
    let client = reqwest::Client::new();
    let response = client
        .get(server.http_url("/api/chat/messages"))
        .bearer_auth(issue_token(TEST_JWT_SECRET))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn login_without_provider_answers_503() {
    let server = configured_server();
    let client = reqwest::Client::new();
    let response = client
        .post(server.http_url("/api/auth/login"))
        .json(&serde_json::json!({"email": "kia@example.com", "password": "Str0ng!pass"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn admin_create_user_checks_the_admin_key() {
    let server = configured_server();
    let client = reqwest::Client::new();

    let response = client
        .post(server.http_url("/api/admin/create-user"))
        .header("x-admin-api-key", "wrong-key")
        .json(&serde_json::json!({"email": "new@example.com", "password": "Str0ng!pass"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn admin_create_user_enforces_password_policy() {
    let server = configured_server();
    let client = reqwest::Client::new();

    let response = client
        .post(server.http_url("/api/admin/create-user"))
        .header("x-admin-api-key", "test-admin-key")
        .json(&serde_json::json!({"email": "new@example.com", "password": "weak"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Invalid password"));
    assert!(message.contains("uppercase"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = configured_server();
    let response = reqwest::get(server.http_url("/api/nope")).await.unwrap();
    assert_eq!(response.status(), 404);
}
