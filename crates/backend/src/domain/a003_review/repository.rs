use contracts::domain::a003_review::aggregate::{Review, ReviewId};
use contracts::domain::common::{AggregateRoot, SubjectKey};

use crate::shared::document_store::{encode, DocumentStore, Query, StoreError};

fn collection() -> &'static str {
    Review::collection_name()
}

/// Отзывы, новые сверху; без субъекта возвращаются все
pub async fn list(
    store: &dyn DocumentStore,
    subject: Option<&SubjectKey>,
) -> Result<Vec<Review>, StoreError> {
    let mut query = Query::new();
    if let Some(subject) = subject {
        query = query.filter_eq("appId", subject.as_str());
    }
    store
        .query(collection(), &query.order_by_desc("createdAt"))
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn insert(store: &dyn DocumentStore, review: &Review) -> Result<ReviewId, StoreError> {
    let id = store.add(collection(), encode(review)?).await?;
    Ok(ReviewId::new(id))
}
