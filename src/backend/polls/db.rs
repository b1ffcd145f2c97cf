//! Database operations for polls.
//!
//! Votes are a JSONB map from person to option index, so recording a vote
//! is a read-modify-write on a single column. Both the create and the vote
//! update fire the notify trigger, putting the full poll (votes included)
//! on the relay's `poll` topic.
use crate::shared::Poll;
use sqlx::PgPool;
use uuid::Uuid;

/// Load all polls, newest first
pub async fn list_polls(pool: &PgPool) -> Result<Vec<Poll>, sqlx::Error> {
    sqlx::query_as::<_, Poll>(
        r#"
        SELECT id, question, options, creator, votes, is_active, created_at
        FROM polls
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Load one poll by id
pub async fn get_poll(pool: &PgPool, id: Uuid) -> Result<Poll, sqlx::Error> {
    sqlx::query_as::<_, Poll>(
        r#"
        SELECT id, question, options, creator, votes, is_active, created_at
        FROM polls
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Create a poll with no votes and return the stored row
pub async fn insert_poll(
    pool: &PgPool,
    question: &str,
    options: &[String],
    creator: &str,
) -> Result<Poll, sqlx::Error> {
    sqlx::query_as::<_, Poll>(
        r#"
        INSERT INTO polls (question, options, creator, votes, is_active)
        VALUES ($1, $2, $3, '{}'::jsonb, TRUE)
        RETURNING id, question, options, creator, votes, is_active, created_at
        "#,
    )
    .bind(question)
    .bind(options)
    .bind(creator)
    .fetch_one(pool)
    .await
}

/// Replace a poll's votes map and return the stored row
pub async fn update_votes(
    pool: &PgPool,
    id: Uuid,
    votes: &serde_json::Value,
) -> Result<Poll, sqlx::Error> {
    sqlx::query_as::<_, Poll>(
        r#"
        UPDATE polls
        SET votes = $2
        WHERE id = $1
        RETURNING id, question, options, creator, votes, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(votes)
    .fetch_one(pool)
    .await
}
