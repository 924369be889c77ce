use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a006_contact_submission::aggregate::{
    ContactSubmission, ContactSubmissionDto,
};

use super::error_status;
use crate::domain::a006_contact_submission;
use crate::shared::state::AppState;

/// GET /api/contacts
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>, StatusCode> {
    match a006_contact_submission::service::list_all(state.store()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("list contacts", e)),
    }
}

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<ContactSubmissionDto>,
) -> Result<(StatusCode, Json<ContactSubmission>), StatusCode> {
    match a006_contact_submission::service::create(state.store(), dto).await {
        Ok(v) => Ok((StatusCode::CREATED, Json(v))),
        Err(e) => Err(error_status("create contact", e)),
    }
}
