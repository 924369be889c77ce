use contracts::domain::a001_order::aggregate::{Order, OrderDto, OrderId};
use contracts::enums::order_status::OrderStatus;

use super::repository;
use crate::shared::document_store::DocumentStore;
use crate::shared::error::{DomainError, DomainResult};

/// Создание нового заказа (статус `new`)
pub async fn create(store: &dyn DocumentStore, dto: OrderDto) -> DomainResult<Order> {
    dto.validate().map_err(DomainError::Validation)?;

    let mut order = Order::new_for_insert(dto);
    order.id = repository::insert(store, &order).await?;
    tracing::info!(order_id = %order.id.value(), "order created");
    Ok(order)
}

/// Список заказов, при необходимости только с заданным статусом
pub async fn list(store: &dyn DocumentStore, status: Option<OrderStatus>) -> DomainResult<Vec<Order>> {
    let orders = match status {
        Some(status) => repository::list_by_status(store, status).await?,
        None => repository::list_all(store).await?,
    };
    Ok(orders)
}

pub async fn get_by_id(store: &dyn DocumentStore, id: &OrderId) -> DomainResult<Option<Order>> {
    Ok(repository::get_by_id(store, id).await?)
}

/// Смена статуса. Переходы не проверяются: допустим любой статус из списка.
pub async fn update_status(
    store: &dyn DocumentStore,
    id: &OrderId,
    status: OrderStatus,
) -> DomainResult<()> {
    repository::update_status(store, id, status).await?;
    tracing::info!(order_id = %id.value(), status = %status, "order status changed");
    Ok(())
}

pub async fn delete(store: &dyn DocumentStore, id: &OrderId) -> DomainResult<()> {
    repository::delete(store, id).await?;
    tracing::info!(order_id = %id.value(), "order deleted");
    Ok(())
}
