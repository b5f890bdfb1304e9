//! Alert rule endpoints

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
use crate::models::{coerce, AlertRule, NewAlertRule};

/// Body of a successful POST
#[derive(Serialize)]
pub struct CreatedRuleResponse {
    pub message: &'static str,
    #[serde(rename = "newRule")]
    pub new_rule: AlertRule,
}

/// GET /api/alerts - every stored rule
async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<AlertRule>>, ApiError> {
    let rules = state
        .alerts
        .list()
        .await
        .or_internal("Error fetching alert rules")?;

    Ok(Json(rules))
}

/// POST /api/alerts - store one rule
async fn create_alert(
    State(state): State<AppState>,
    body: Result<JsonObject, BodyError>,
) -> Result<(StatusCode, Json<CreatedRuleResponse>), ApiError> {
    const CONTEXT: &str = "Error creating alert rule";

    let JsonObject(fields) = body.or_internal(CONTEXT)?;
    let new_rule = state
        .alerts
        .insert(NewAlertRule::from_fields(&fields))
        .await
        .or_internal(CONTEXT)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedRuleResponse {
            message: "Alert rule created",
            new_rule,
        }),
    ))
}

/// DELETE /api/alerts?id= - remove one rule
async fn delete_alert(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Error deleting alert rule";

    let query = IdQuery::from_pairs(pairs);
    let raw = query.raw().ok_or(ApiError::MissingParameter {
        message: "Missing alert rule ID",
    })?;
    let id = coerce::to_record_id(raw).or_internal(CONTEXT)?;
    state.alerts.delete(id).await.or_internal(CONTEXT)?;

    Ok(Json(json!({ "message": format!("Alert rule {} deleted", raw) })))
}

/// Alert rule routes
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/alerts",
        get(list_alerts).post(create_alert).delete(delete_alert),
    )
}
