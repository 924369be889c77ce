use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d400_summary::DashboardSummary;
use contracts::dashboards::d401_analytics::AnalyticsOverview;

use super::error_status;
use crate::dashboards::{d400_summary, d401_analytics};
use crate::shared::state::AppState;

/// GET /api/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, StatusCode> {
    match d400_summary::service::get_summary(&state.aggregator).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("dashboard summary", e)),
    }
}

/// GET /api/dashboard/analytics
pub async fn analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsOverview>, StatusCode> {
    match d401_analytics::service::get_overview(&state.aggregator, &state.subjects).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("analytics overview", e)),
    }
}
