//! Документы-одиночки коллекции `analytics`: `visits` (`{count}`) и
//! `appViews` (`{<app>: count}`).

use contracts::domain::common::SubjectKey;
use serde_json::Value;

use super::view_counts::{count_of, ViewCounts};
use crate::shared::document_store::{Document, DocumentStore, Fields, StoreError};

pub const COLLECTION: &str = "analytics";
pub const VISITS_DOC: &str = "visits";
pub const APP_VIEWS_DOC: &str = "appViews";

const COUNT_FIELD: &str = "count";

fn single_field(field: &str, count: u64) -> Fields {
    Fields::from_iter([(field.to_string(), Value::from(count))])
}

pub async fn read_visits_doc(store: &dyn DocumentStore) -> Result<Option<Document>, StoreError> {
    store.get(COLLECTION, VISITS_DOC).await
}

pub fn visits_of(doc: &Document) -> u64 {
    count_of(&doc.fields, COUNT_FIELD)
}

/// Записать новое значение счётчика визитов. Существующий документ
/// обновляется точечно, отсутствующий создаётся.
pub async fn write_visits(
    store: &dyn DocumentStore,
    count: u64,
    exists: bool,
) -> Result<(), StoreError> {
    let fields = single_field(COUNT_FIELD, count);
    if exists {
        store.update(COLLECTION, VISITS_DOC, fields).await
    } else {
        store.set(COLLECTION, VISITS_DOC, fields).await
    }
}

pub async fn read_views_doc(store: &dyn DocumentStore) -> Result<Option<Document>, StoreError> {
    store.get(COLLECTION, APP_VIEWS_DOC).await
}

pub async fn read_view_counts(store: &dyn DocumentStore) -> Result<ViewCounts, StoreError> {
    Ok(read_views_doc(store)
        .await?
        .map(|doc| ViewCounts::from_fields(&doc.fields))
        .unwrap_or_default())
}

/// Записать счётчик одного приложения, не трогая остальные ключи документа
pub async fn write_view(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    count: u64,
    exists: bool,
) -> Result<(), StoreError> {
    let fields = single_field(subject.as_str(), count);
    if exists {
        store.update(COLLECTION, APP_VIEWS_DOC, fields).await
    } else {
        store.set(COLLECTION, APP_VIEWS_DOC, fields).await
    }
}
