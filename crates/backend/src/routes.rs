use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::shared::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // ORDERS
        // ========================================
        .route(
            "/api/orders",
            get(handlers::a001_order::list_all).post(handlers::a001_order::create),
        )
        .route(
            "/api/orders/:id",
            get(handlers::a001_order::get_by_id).delete(handlers::a001_order::delete),
        )
        .route(
            "/api/orders/:id/status",
            put(handlers::a001_order::update_status),
        )
        // ========================================
        // RATINGS / REVIEWS / LOVES
        // ========================================
        .route("/api/ratings", post(handlers::a002_rating::submit))
        .route(
            "/api/ratings/:app_id/summary",
            get(handlers::a002_rating::summary),
        )
        .route(
            "/api/ratings/:app_id/:device_id",
            get(handlers::a002_rating::get_user_rating),
        )
        .route(
            "/api/reviews",
            get(handlers::a003_review::list).post(handlers::a003_review::create),
        )
        .route("/api/loves/toggle", post(handlers::a004_love::toggle))
        .route("/api/loves/:app_id", get(handlers::a004_love::count))
        .route(
            "/api/loves/:app_id/:device_id",
            get(handlers::a004_love::state_for_device),
        )
        // ========================================
        // DONATIONS / CONTACTS
        // ========================================
        .route(
            "/api/donations",
            get(handlers::a005_donation::list_all).post(handlers::a005_donation::create),
        )
        .route(
            "/api/donations/:id/status",
            put(handlers::a005_donation::update_status),
        )
        .route(
            "/api/contacts",
            get(handlers::a006_contact_submission::list_all)
                .post(handlers::a006_contact_submission::create),
        )
        // ========================================
        // SITE ANALYTICS
        // ========================================
        .route(
            "/api/analytics/visits",
            get(handlers::a007_site_analytics::total_visits)
                .post(handlers::a007_site_analytics::record_visit),
        )
        .route(
            "/api/analytics/views",
            get(handlers::a007_site_analytics::views),
        )
        .route(
            "/api/analytics/views/:app_id",
            post(handlers::a007_site_analytics::record_view),
        )
        .route(
            "/api/analytics/most-viewed",
            get(handlers::a007_site_analytics::most_viewed),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route("/api/dashboard/summary", get(handlers::dashboard::summary))
        .route(
            "/api/dashboard/analytics",
            get(handlers::dashboard::analytics),
        )
        .with_state(state)
}
