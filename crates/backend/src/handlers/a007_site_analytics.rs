use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};

use super::{error_status, parse_subject};
use crate::shared::state::AppState;

/// POST /api/analytics/visits
pub async fn record_visit(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    match state.aggregator.increment_visits().await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_status("record visit", e)),
    }
}

/// GET /api/analytics/visits
pub async fn total_visits(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    match state.aggregator.total_visits().await {
        Ok(count) => Ok(Json(json!({ "count": count }))),
        Err(e) => Err(error_status("total visits", e)),
    }
}

/// POST /api/analytics/views/:app_id
pub async fn record_view(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let subject = parse_subject(app_id)?;
    match state.aggregator.increment_subject_view(&subject).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_status("record view", e)),
    }
}

/// GET /api/analytics/views
pub async fn views(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, StatusCode> {
    match state.aggregator.subject_views().await {
        Ok(counts) => Ok(Json(
            counts
                .iter()
                .map(|(key, count)| (key.to_string(), Value::from(count)))
                .collect(),
        )),
        Err(e) => Err(error_status("subject views", e)),
    }
}

/// GET /api/analytics/most-viewed
pub async fn most_viewed(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    match state.aggregator.most_viewed_subject().await {
        Ok(Some((app_id, count))) => Ok(Json(json!({ "appId": app_id, "count": count }))),
        Ok(None) => Ok(Json(Value::Null)),
        Err(e) => Err(error_status("most viewed", e)),
    }
}
