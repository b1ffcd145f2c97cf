//! Database operations for wellness metrics.
//!
//! One row per person, replaced wholesale on every update. The upsert
//! fires the notify trigger either way, so the relay sees both first
//! check-ins and later edits as the same kind of event.
use crate::shared::WellnessMetrics;
use sqlx::PgPool;

/// A full set of metrics for one person
#[derive(Debug, Clone)]
pub struct MetricsUpdate {
    pub hydration: i32,
    pub sleep: f64,
    pub alcohol_units: i32,
    pub hangover_risk: f64,
}

/// Load every person's metrics
pub async fn list_metrics(pool: &PgPool) -> Result<Vec<WellnessMetrics>, sqlx::Error> {
    sqlx::query_as::<_, WellnessMetrics>(
        r#"
        SELECT person, hydration, sleep, alcohol_units, hangover_risk, updated_at
        FROM wellness_metrics
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Upsert one person's metrics and return the stored row
pub async fn upsert_metrics(
    pool: &PgPool,
    person: &str,
    metrics: &MetricsUpdate,
) -> Result<WellnessMetrics, sqlx::Error> {
    sqlx::query_as::<_, WellnessMetrics>(
        r#"
        INSERT INTO wellness_metrics
            (person, hydration, sleep, alcohol_units, hangover_risk, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (person) DO UPDATE SET
            hydration = EXCLUDED.hydration,
            sleep = EXCLUDED.sleep,
            alcohol_units = EXCLUDED.alcohol_units,
            hangover_risk = EXCLUDED.hangover_risk,
            updated_at = NOW()
        RETURNING person, hydration, sleep, alcohol_units, hangover_risk, updated_at
        "#,
    )
    .bind(person)
    .bind(metrics.hydration)
    .bind(metrics.sleep)
    .bind(metrics.alcohol_units)
    .bind(metrics.hangover_risk)
    .fetch_one(pool)
    .await
}
