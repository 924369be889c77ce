use contracts::domain::a006_contact_submission::aggregate::{
    ContactSubmission, ContactSubmissionId,
};
use contracts::domain::common::AggregateRoot;

use crate::shared::document_store::{encode, DocumentStore, Query, StoreError};

fn collection() -> &'static str {
    ContactSubmission::collection_name()
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<ContactSubmission>, StoreError> {
    store
        .query(collection(), &Query::new().order_by_desc("createdAt"))
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn insert(
    store: &dyn DocumentStore,
    submission: &ContactSubmission,
) -> Result<ContactSubmissionId, StoreError> {
    let id = store.add(collection(), encode(submission)?).await?;
    Ok(ContactSubmissionId::new(id))
}

pub async fn count_all(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    store.count(collection(), &Query::new()).await
}
