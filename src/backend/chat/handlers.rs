/**
 * Chat Route Handlers
 *
 * REST endpoints for the group chat:
 *
 * - `GET  /api/chat/messages` - full message history, oldest first
 * - `POST /api/chat/messages` - send a message
 *
 * Request bodies use the camelCase field names the web client sends;
 * responses are the stored rows. Real-time delivery happens via the relay,
 * fed by the insert trigger, so clients treat the POST response and the
 * relayed event as the same record.
 */
use crate::backend::chat::db::{self, NewChatMessage};
use crate::backend::error::BackendError;
use crate::shared::ChatMessage;
use axum::{extract::State, response::Json};
use serde::Deserialize;
use sqlx::PgPool;

/// Body of POST /api/chat/messages
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub is_location: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_voice_memo: bool,
    #[serde(default)]
    pub voice_memo_url: Option<String>,
    #[serde(default)]
    pub is_photo: bool,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl From<PostMessageRequest> for NewChatMessage {
    fn from(request: PostMessageRequest) -> Self {
        Self {
            sender: request.sender,
            text: request.text,
            is_location: request.is_location,
            location: request.location,
            is_voice_memo: request.is_voice_memo,
            voice_memo_url: request.voice_memo_url,
            is_photo: request.is_photo,
            photo_url: request.photo_url,
        }
    }
}

/// List all chat messages (GET /api/chat/messages)
pub async fn get_messages(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let messages = db::list_messages(&pool).await?;
    Ok(Json(messages))
}

/// Send a chat message (POST /api/chat/messages)
pub async fn post_message(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<ChatMessage>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let message = db::insert_message(&pool, &request.into()).await?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case() {
        let body = r#"{
            "sender": "Kia",
            "text": "meet at the pool",
            "isLocation": true,
            "location": "Encore Beach Club"
        }"#;
        let request: PostMessageRequest = serde_json::from_str(body).unwrap();
        assert!(request.is_location);
        assert_eq!(request.location.as_deref(), Some("Encore Beach Club"));
        assert!(!request.is_photo);
    }

    #[test]
    fn test_attachment_fields_default_off() {
        let request: PostMessageRequest =
            serde_json::from_str(r#"{"sender": "Dana", "text": "hi"}"#).unwrap();
        let new: NewChatMessage = request.into();
        assert!(!new.is_location && !new.is_voice_memo && !new.is_photo);
        assert!(new.location.is_none());
    }
}
