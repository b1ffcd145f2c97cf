/**
 * Relay WebSocket Endpoint
 *
 * Accepts client connections on `GET /ws`, upgrades them, and wires each
 * socket into the broadcast path: frames from the broadcaster are forwarded
 * to the socket, and membership is tracked in the connection registry for
 * the life of the connection.
 *
 * # Inbound Frames
 *
 * No client-to-server protocol is defined. Inbound text frames are parsed
 * as JSON and discarded; a parse failure is logged and does not close the
 * connection.
 *
 * # Authentication
 *
 * By default any client that can reach the port is admitted. When
 * `RELAY_REQUIRE_AUTH=true`, the upgrade request must carry the same bearer
 * token the REST layer accepts, either as an `Authorization: Bearer` header
 * or a `token` query parameter (browser WebSocket clients cannot set
 * headers).
 */
use crate::backend::auth::tokens::verify_token;
use crate::backend::relay::broadcaster::Broadcaster;
use crate::backend::relay::registry::ConnectionRegistry;
use crate::backend::server::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use tokio::sync::broadcast::error::RecvError;

/// WebSocket upgrade handler (GET /ws)
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Response, StatusCode> {
    if state.config.relay_require_auth {
        authorize_upgrade(&state, &headers, &params)?;
    }

    let broadcaster = state.broadcaster.clone();
    let registry = state.registry.clone();
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, broadcaster, registry)))
}

/// Check the bearer token on an upgrade request
fn authorize_upgrade(
    state: &AppState,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Result<(), StatusCode> {
    let secret = state.config.auth_jwt_secret.as_deref().ok_or_else(|| {
        tracing::error!("[Relay] RELAY_REQUIRE_AUTH set but AUTH_JWT_SECRET is not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .or_else(|| params.get("token").map(String::as_str))
        .ok_or_else(|| {
            tracing::warn!("[Relay] Upgrade rejected: no bearer token");
            StatusCode::UNAUTHORIZED
        })?;

    verify_token(secret, token).map_err(|e| {
        tracing::warn!("[Relay] Upgrade rejected: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    Ok(())
}

/// Drive one upgraded connection until either side closes it
async fn handle_socket(socket: WebSocket, broadcaster: Broadcaster, registry: ConnectionRegistry) {
    let connection_id = registry.register();
    let (mut sender, mut receiver) = socket.split();
    let mut rx = broadcaster.subscribe();

    // Forward broadcast frames to this client.
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(frame) => {
                    if sender.send(Message::Text(frame.text.as_ref().into())).await.is_err() {
                        // Socket gone; treated the same as an explicit close.
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Relay] Connection fell behind, skipped {} frame(s)",
                        skipped
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Accept inbound frames; parse and discard.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    match serde_json::from_str::<serde_json::Value>(text.as_str()) {
                        Ok(value) => {
                            tracing::debug!("[Relay] Inbound client frame: {}", value);
                        }
                        Err(e) => {
                            tracing::warn!("[Relay] Ignoring malformed client frame: {}", e);
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Either half finishing means the connection is done.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    registry.deregister(connection_id);
}
