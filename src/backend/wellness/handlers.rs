/**
 * Wellness Route Handlers
 *
 * - `GET /api/wellness/metrics` - every person's current metrics
 * - `PUT /api/wellness/metrics` - upsert one person's metrics
 *
 * The hangover risk is computed by the client and stored as-is; the server
 * treats the metrics as opaque numbers.
 */
use crate::backend::error::BackendError;
use crate::backend::wellness::db::{self, MetricsUpdate};
use crate::shared::WellnessMetrics;
use axum::{extract::State, response::Json};
use serde::Deserialize;
use sqlx::PgPool;

/// Body of PUT /api/wellness/metrics
#[derive(Debug, Deserialize)]
pub struct PutMetricsRequest {
    pub person: String,
    pub metrics: MetricsBody,
}

/// The metrics object inside the request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBody {
    pub hydration: i32,
    pub sleep: f64,
    #[serde(default)]
    pub alcohol_units: i32,
    #[serde(default)]
    pub hangover_risk: f64,
}

/// List wellness metrics (GET /api/wellness/metrics)
pub async fn get_metrics(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<WellnessMetrics>>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let metrics = db::list_metrics(&pool).await?;
    Ok(Json(metrics))
}

/// Upsert one person's metrics (PUT /api/wellness/metrics)
pub async fn put_metrics(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<PutMetricsRequest>,
) -> Result<Json<WellnessMetrics>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;
    let update = MetricsUpdate {
        hydration: request.metrics.hydration,
        sleep: request.metrics.sleep,
        alcohol_units: request.metrics.alcohol_units,
        hangover_risk: request.metrics.hangover_risk,
    };
    let row = db::upsert_metrics(&pool, &request.person, &update).await?;
    Ok(Json(row))
}
