use contracts::domain::a004_love::aggregate::{Love, LoveId};
use contracts::domain::common::{ActorKey, AggregateRoot, SubjectKey};

use crate::shared::document_store::{encode, DocumentStore, Query, StoreError};

fn collection() -> &'static str {
    Love::collection_name()
}

fn by_pair(subject: &SubjectKey, actor: &ActorKey) -> Query {
    Query::new()
        .filter_eq("appId", subject.as_str())
        .filter_eq("deviceId", actor.as_str())
}

pub async fn find_by_subject_and_actor(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    actor: &ActorKey,
) -> Result<Option<Love>, StoreError> {
    store
        .query(collection(), &by_pair(subject, actor))
        .await?
        .into_iter()
        .next()
        .map(|doc| doc.decode())
        .transpose()
}

pub async fn exists(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    actor: &ActorKey,
) -> Result<bool, StoreError> {
    Ok(store.count(collection(), &by_pair(subject, actor)).await? > 0)
}

pub async fn count_by_subject(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
) -> Result<u64, StoreError> {
    let query = Query::new().filter_eq("appId", subject.as_str());
    store.count(collection(), &query).await
}

pub async fn insert(store: &dyn DocumentStore, love: &Love) -> Result<LoveId, StoreError> {
    let id = store.add(collection(), encode(love)?).await?;
    Ok(LoveId::new(id))
}

pub async fn delete(store: &dyn DocumentStore, id: &LoveId) -> Result<(), StoreError> {
    store.delete(collection(), id.value()).await
}
