use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_review::aggregate::{Review, ReviewDto};
use serde::Deserialize;

use super::{error_status, parse_subject};
use crate::domain::a003_review;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub subject: Option<String>,
}

/// GET /api/reviews?subject=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<Review>>, StatusCode> {
    let subject = query.subject.map(parse_subject).transpose()?;
    match a003_review::service::list(state.store(), subject.as_ref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("list reviews", e)),
    }
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<ReviewDto>,
) -> Result<(StatusCode, Json<Review>), StatusCode> {
    match a003_review::service::create(state.store(), dto).await {
        Ok(v) => Ok((StatusCode::CREATED, Json(v))),
        Err(e) => Err(error_status("create review", e)),
    }
}
