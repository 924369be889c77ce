use contracts::domain::a001_order::aggregate::{Order, OrderId};
use contracts::domain::common::AggregateRoot;
use contracts::enums::order_status::OrderStatus;
use serde_json::Value;

use crate::shared::document_store::{encode, DocumentStore, Fields, Query, StoreError};

fn collection() -> &'static str {
    Order::collection_name()
}

/// Все заказы, новые сверху
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Order>, StoreError> {
    let query = Query::new().order_by_desc("createdAt");
    store
        .query(collection(), &query)
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn list_by_status(
    store: &dyn DocumentStore,
    status: OrderStatus,
) -> Result<Vec<Order>, StoreError> {
    let query = Query::new()
        .filter_eq("status", status.code())
        .order_by_desc("createdAt");
    store
        .query(collection(), &query)
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn get_by_id(store: &dyn DocumentStore, id: &OrderId) -> Result<Option<Order>, StoreError> {
    store
        .get(collection(), id.value())
        .await?
        .map(|doc| doc.decode())
        .transpose()
}

pub async fn insert(store: &dyn DocumentStore, order: &Order) -> Result<OrderId, StoreError> {
    let id = store.add(collection(), encode(order)?).await?;
    Ok(OrderId::new(id))
}

pub async fn update_status(
    store: &dyn DocumentStore,
    id: &OrderId,
    status: OrderStatus,
) -> Result<(), StoreError> {
    let fields = Fields::from_iter([("status".to_string(), Value::from(status.code()))]);
    store.update(collection(), id.value(), fields).await
}

pub async fn delete(store: &dyn DocumentStore, id: &OrderId) -> Result<(), StoreError> {
    store.delete(collection(), id.value()).await
}

pub async fn count_all(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(collection(), &Query::new()).await
}
