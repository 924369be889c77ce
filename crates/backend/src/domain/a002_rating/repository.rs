use chrono::{DateTime, Utc};
use contracts::domain::a002_rating::aggregate::{Rating, RatingId};
use contracts::domain::common::{ActorKey, AggregateRoot, SubjectKey};
use serde_json::Value;

use crate::shared::document_store::{encode, DocumentStore, Fields, Query, StoreError};

fn collection() -> &'static str {
    Rating::collection_name()
}

fn by_subject(subject: &SubjectKey) -> Query {
    Query::new().filter_eq("appId", subject.as_str())
}

/// Оценка устройства для приложения. При дублях (после гонки) берётся
/// самая ранняя запись.
pub async fn find_by_subject_and_actor(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    actor: &ActorKey,
) -> Result<Option<Rating>, StoreError> {
    let query = by_subject(subject).filter_eq("deviceId", actor.as_str());
    store
        .query(collection(), &query)
        .await?
        .into_iter()
        .next()
        .map(|doc| doc.decode())
        .transpose()
}

pub async fn list_by_subject(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
) -> Result<Vec<Rating>, StoreError> {
    store
        .query(collection(), &by_subject(subject))
        .await?
        .into_iter()
        .map(|doc| doc.decode())
        .collect()
}

pub async fn count_by_subject(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
) -> Result<u64, StoreError> {
    store.count(collection(), &by_subject(subject)).await
}

pub async fn insert(store: &dyn DocumentStore, rating: &Rating) -> Result<RatingId, StoreError> {
    let id = store.add(collection(), encode(rating)?).await?;
    Ok(RatingId::new(id))
}

/// Перезаписать значение и время существующей оценки
pub async fn update_value(
    store: &dyn DocumentStore,
    id: &RatingId,
    value: u8,
    at: DateTime<Utc>,
) -> Result<(), StoreError> {
    let fields = Fields::from_iter([
        ("rating".to_string(), Value::from(value)),
        ("createdAt".to_string(), serde_json::to_value(at)?),
    ]);
    store.update(collection(), id.value(), fields).await
}
