/**
 * Poll Route Handlers
 *
 * - `GET  /api/polls` - all polls, newest first
 * - `POST /api/polls` - create a poll
 * - `POST /api/polls/{id}/vote` - record one person's vote
 *
 * Voting overwrites the person's previous vote; the votes map keeps only
 * the latest option index per person. There is no vote withdrawal.
 */
use crate::backend::error::BackendError;
use crate::backend::polls::db;
use crate::shared::Poll;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Body of POST /api/polls
#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub creator: String,
}

/// Body of POST /api/polls/{id}/vote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub person: String,
    pub option_index: usize,
}

/// List polls (GET /api/polls)
pub async fn get_polls(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<Poll>>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let polls = db::list_polls(&pool).await?;
    Ok(Json(polls))
}

/// Create a poll (POST /api/polls)
pub async fn create_poll(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<CreatePollRequest>,
) -> Result<Json<Poll>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    if request.options.len() < 2 {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "A poll needs at least two options",
        ));
    }
    let poll = db::insert_poll(&pool, &request.question, &request.options, &request.creator)
        .await?;
    Ok(Json(poll))
}

/// Record a vote (POST /api/polls/{id}/vote)
pub async fn vote(
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<Poll>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;

    let poll = db::get_poll(&pool, id).await?;
    if request.option_index >= poll.options.len() {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!(
                "Option index {} out of range for {} options",
                request.option_index,
                poll.options.len()
            ),
        ));
    }

    let mut votes = poll.votes;
    if !votes.is_object() {
        votes = serde_json::json!({});
    }
    if let Some(map) = votes.as_object_mut() {
        map.insert(
            request.person.clone(),
            serde_json::json!(request.option_index),
        );
    }

    let updated = db::update_votes(&pool, id, &votes).await?;
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_request_accepts_camel_case() {
        let request: VoteRequest =
            serde_json::from_str(r#"{"person": "Kia", "optionIndex": 1}"#).unwrap();
        assert_eq!(request.person, "Kia");
        assert_eq!(request.option_index, 1);
    }

    #[test]
    fn test_create_poll_request_shape() {
        let body = r#"{"question": "Dinner?", "options": ["Sushi", "Tacos"], "creator": "Dana"}"#;
        let request: CreatePollRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.options.len(), 2);
    }
}
