/**
 * Database Operations for Chat Messages
 *
 * Persistence for the group chat. Inserts fire the `messages_notify`
 * trigger, which is what pushes the new message onto the relay; the
 * handlers never talk to the broadcaster directly.
 */
use crate::shared::ChatMessage;
use sqlx::PgPool;

/// Fields for a new chat message
///
/// A message is plain text plus at most one attachment flavor (location,
/// voice memo, or photo), mirroring what the chat UI can compose.
#[derive(Debug, Clone, Default)]
pub struct NewChatMessage {
    pub sender: String,
    pub text: String,
    pub is_location: bool,
    pub location: Option<String>,
    pub is_voice_memo: bool,
    pub voice_memo_url: Option<String>,
    pub is_photo: bool,
    pub photo_url: Option<String>,
}

/// Load all messages ordered by timestamp ascending
pub async fn list_messages(pool: &PgPool) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, sender, text, is_location, location,
               is_voice_memo, voice_memo_url, is_photo, photo_url, timestamp
        FROM messages
        ORDER BY timestamp ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Insert a message and return the stored row
pub async fn insert_message(
    pool: &PgPool,
    new: &NewChatMessage,
) -> Result<ChatMessage, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO messages
            (sender, text, is_location, location,
             is_voice_memo, voice_memo_url, is_photo, photo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, sender, text, is_location, location,
                  is_voice_memo, voice_memo_url, is_photo, photo_url, timestamp
        "#,
    )
    .bind(&new.sender)
    .bind(&new.text)
    .bind(new.is_location)
    .bind(&new.location)
    .bind(new.is_voice_memo)
    .bind(&new.voice_memo_url)
    .bind(new.is_photo)
    .bind(&new.photo_url)
    .fetch_one(pool)
    .await
}
