//! Database operations for itinerary items.
use crate::shared::ItineraryItem;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Load all items ordered by date ascending
pub async fn list_items(pool: &PgPool) -> Result<Vec<ItineraryItem>, sqlx::Error> {
    sqlx::query_as::<_, ItineraryItem>(
        r#"
        SELECT id, date, activity, location, time, created_at
        FROM itinerary
        ORDER BY date ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Insert an item and return the stored row
pub async fn insert_item(
    pool: &PgPool,
    date: NaiveDate,
    activity: &str,
    location: &str,
    time: &str,
) -> Result<ItineraryItem, sqlx::Error> {
    sqlx::query_as::<_, ItineraryItem>(
        r#"
        INSERT INTO itinerary (date, activity, location, time)
        VALUES ($1, $2, $3, $4)
        RETURNING id, date, activity, location, time, created_at
        "#,
    )
    .bind(date)
    .bind(activity)
    .bind(location)
    .bind(time)
    .fetch_one(pool)
    .await
}
