use contracts::domain::a005_donation::aggregate::{Donation, DonationId};
use contracts::domain::common::AggregateRoot;
use contracts::enums::donation_status::DonationStatus;
use serde_json::Value;

use crate::shared::document_store::{encode, DocumentStore, Fields, Query, StoreError};

fn collection() -> &'static str {
    Donation::collection_name()
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Donation>, StoreError> {
    store
        .query(collection(), &Query::new().order_by_desc("createdAt"))
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn insert(store: &dyn DocumentStore, donation: &Donation) -> Result<DonationId, StoreError> {
    let id = store.add(collection(), encode(donation)?).await?;
    Ok(DonationId::new(id))
}

pub async fn update_status(
    store: &dyn DocumentStore,
    id: &DonationId,
    status: DonationStatus,
) -> Result<(), StoreError> {
    let fields = Fields::from_iter([("status".to_string(), Value::from(status.code()))]);
    store.update(collection(), id.value(), fields).await
}

pub async fn count_all(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(collection(), &Query::new()).await
}
