//! Itinerary route handlers.
//!
//! - `GET  /api/itinerary` - items ordered by date
//! - `POST /api/itinerary` - add an item
use crate::backend::error::BackendError;
use crate::backend::itinerary::db;
use crate::shared::ItineraryItem;
use axum::{extract::State, response::Json};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

/// Body of POST /api/itinerary
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub date: NaiveDate,
    pub activity: String,
    pub location: String,
    pub time: String,
}

/// List itinerary items (GET /api/itinerary)
pub async fn get_itinerary(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<ItineraryItem>>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let items = db::list_items(&pool).await?;
    Ok(Json(items))
}

/// Add an itinerary item (POST /api/itinerary)
pub async fn create_item(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<ItineraryItem>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let item = db::insert_item(
        &pool,
        request.date,
        &request.activity,
        &request.location,
        &request.time,
    )
    .await?;
    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_request_parses_iso_date() {
        let body = r#"{"date": "2026-09-18", "activity": "Pool", "location": "Wynn", "time": "11:00"}"#;
        let request: CreateItemRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.date.to_string(), "2026-09-18");
    }
}
