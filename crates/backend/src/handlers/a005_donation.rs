use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_donation::aggregate::{
    Donation, DonationDto, DonationId, DonationStatusUpdate,
};
use contracts::enums::donation_status::DonationStatus;

use super::{error_status, parse_id, parse_status};
use crate::domain::a005_donation;
use crate::shared::state::AppState;

/// GET /api/donations
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Donation>>, StatusCode> {
    match a005_donation::service::list_all(state.store()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("list donations", e)),
    }
}

/// POST /api/donations
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<DonationDto>,
) -> Result<(StatusCode, Json<Donation>), StatusCode> {
    match a005_donation::service::create(state.store(), dto).await {
        Ok(v) => Ok((StatusCode::CREATED, Json(v))),
        Err(e) => Err(error_status("create donation", e)),
    }
}

/// PUT /api/donations/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<DonationStatusUpdate>,
) -> Result<StatusCode, StatusCode> {
    let id: DonationId = parse_id(&id)?;
    let status = parse_status(&body.status, DonationStatus::from_code)?;
    match a005_donation::service::update_status(state.store(), &id, status).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_status("update donation status", e)),
    }
}
