use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_rating::aggregate::{Rating, RatingDto, RatingSummary};
use serde_json::json;

use super::{error_status, parse_actor, parse_subject};
use crate::shared::state::AppState;

/// POST /api/ratings
pub async fn submit(
    State(state): State<AppState>,
    Json(dto): Json<RatingDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let subject = parse_subject(dto.app_id)?;
    let actor = parse_actor(dto.device_id)?;
    match state
        .aggregator
        .record_or_get_rating(&subject, &actor, dto.rating)
        .await
    {
        Ok(id) => Ok(Json(json!({ "id": id.value() }))),
        Err(e) => Err(error_status("submit rating", e)),
    }
}

/// GET /api/ratings/:app_id/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<Json<RatingSummary>, StatusCode> {
    let subject = parse_subject(app_id)?;
    let result = tokio::try_join!(
        state.aggregator.average_rating(&subject),
        state.aggregator.rating_count(&subject),
    );
    match result {
        Ok((average, count)) => Ok(Json(RatingSummary {
            app_id: subject,
            average,
            count,
        })),
        Err(e) => Err(error_status("rating summary", e)),
    }
}

/// GET /api/ratings/:app_id/:device_id
pub async fn get_user_rating(
    State(state): State<AppState>,
    Path((app_id, device_id)): Path<(String, String)>,
) -> Result<Json<Rating>, StatusCode> {
    let subject = parse_subject(app_id)?;
    let actor = parse_actor(device_id)?;
    match state.aggregator.get_user_rating(&subject, &actor).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("get user rating", e)),
    }
}
