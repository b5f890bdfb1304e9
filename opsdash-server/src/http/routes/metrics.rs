//! Metric reading endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::IdQuery;
use crate::http::error::{ApiError, OrInternal};
use crate::http::extractors::{BodyError, JsonObject};
use crate::http::server::AppState;
use crate::models::{coerce, MetricReading, NewMetricReading, RECENT_READINGS_LIMIT};

/// Body of a successful POST
#[derive(Serialize)]
pub struct IngestResponse {
    pub message: &'static str,
    pub metric: MetricReading,
}

/// GET /api/metrics - most recent readings, newest first
async fn list_metrics(State(state): State<AppState>) -> Result<Json<Vec<MetricReading>>, ApiError> {
    let readings = state
        .metrics
        .recent(RECENT_READINGS_LIMIT)
        .await
        .or_internal("Error fetching metrics")?;

    Ok(Json(readings))
}

/// POST /api/metrics - record one reading
async fn create_metric(
    State(state): State<AppState>,
    body: Result<JsonObject, BodyError>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    const CONTEXT: &str = "Error ingesting metric";

    let JsonObject(fields) = body.or_internal(CONTEXT)?;
    let reading = NewMetricReading::from_fields(&fields).or_internal(CONTEXT)?;
    let metric = state.metrics.insert(reading).await.or_internal(CONTEXT)?;

    tracing::debug!(id = metric.id, metric_name = %metric.metric_name, "metric reading ingested");

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "Metric reading ingested",
            metric,
        }),
    ))
}

/// DELETE /api/metrics?id= - remove one reading
async fn delete_metric(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Error deleting metric";

    let query = IdQuery::from_pairs(pairs);
    let raw = query.raw().ok_or(ApiError::MissingParameter {
        message: "Missing metric ID",
    })?;
    let id = coerce::to_record_id(raw).or_internal(CONTEXT)?;
    state.metrics.delete(id).await.or_internal(CONTEXT)?;

    Ok(Json(json!({ "message": format!("Metric {} deleted", raw) })))
}

/// Metric routes
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/metrics",
        get(list_metrics).post(create_metric).delete(delete_metric),
    )
}
