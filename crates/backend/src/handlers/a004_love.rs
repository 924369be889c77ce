use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_love::aggregate::{LoveState, LoveToggleDto};
use serde_json::json;

use super::{error_status, parse_actor, parse_subject};
use crate::shared::state::AppState;

/// POST /api/loves/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Json(dto): Json<LoveToggleDto>,
) -> Result<Json<LoveState>, StatusCode> {
    let subject = parse_subject(dto.app_id)?;
    let actor = parse_actor(dto.device_id)?;
    let loved = state
        .aggregator
        .toggle_love(&subject, &actor)
        .await
        .map_err(|e| error_status("toggle love", e))?;
    let count = state
        .aggregator
        .love_count(&subject)
        .await
        .map_err(|e| error_status("love count", e))?;
    Ok(Json(LoveState { loved, count }))
}

/// GET /api/loves/:app_id
pub async fn count(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let subject = parse_subject(app_id)?;
    match state.aggregator.love_count(&subject).await {
        Ok(count) => Ok(Json(json!({ "appId": subject, "count": count }))),
        Err(e) => Err(error_status("love count", e)),
    }
}

/// GET /api/loves/:app_id/:device_id
pub async fn state_for_device(
    State(state): State<AppState>,
    Path((app_id, device_id)): Path<(String, String)>,
) -> Result<Json<LoveState>, StatusCode> {
    let subject = parse_subject(app_id)?;
    let actor = parse_actor(device_id)?;
    let result = tokio::try_join!(
        state.aggregator.has_loved(&subject, &actor),
        state.aggregator.love_count(&subject),
    );
    match result {
        Ok((loved, count)) => Ok(Json(LoveState { loved, count })),
        Err(e) => Err(error_status("love state", e)),
    }
}
