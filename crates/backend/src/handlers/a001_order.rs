use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_order::aggregate::{Order, OrderDto, OrderId, OrderStatusUpdate};
use contracts::enums::order_status::OrderStatus;
use serde::Deserialize;

use super::{error_status, parse_id, parse_status};
use crate::domain::a001_order;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
}

/// GET /api/orders?status=
pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, StatusCode> {
    let status = match query.status.as_deref() {
        Some(code) => Some(parse_status(code, OrderStatus::from_code)?),
        None => None,
    };
    match a001_order::service::list(state.store(), status).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status("list orders", e)),
    }
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, StatusCode> {
    let id: OrderId = parse_id(&id)?;
    match a001_order::service::get_by_id(state.store(), &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("get order", e)),
    }
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<OrderDto>,
) -> Result<(StatusCode, Json<Order>), StatusCode> {
    match a001_order::service::create(state.store(), dto).await {
        Ok(v) => Ok((StatusCode::CREATED, Json(v))),
        Err(e) => Err(error_status("create order", e)),
    }
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<OrderStatusUpdate>,
) -> Result<StatusCode, StatusCode> {
    let id: OrderId = parse_id(&id)?;
    let status = parse_status(&body.status, OrderStatus::from_code)?;
    match a001_order::service::update_status(state.store(), &id, status).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_status("update order status", e)),
    }
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id: OrderId = parse_id(&id)?;
    match a001_order::service::delete(state.store(), &id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_status("delete order", e)),
    }
}
