//! Хранилище в памяти процесса: для тестов и режима `engine = "memory"`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{sort_documents, validate_field_name, Document, DocumentStore, Fields, Query, StoreError};

#[derive(Debug, Clone)]
struct StoredDocument {
    seq: u64,
    fields: Fields,
}

#[derive(Debug, Default)]
struct Collections {
    items: HashMap<String, HashMap<String, StoredDocument>>,
    next_seq: u64,
}

impl Collections {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Имитировать отказ сервиса: все операции вернут `StoreError::Backend`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.check_available()?;
        let id = Uuid::new_v4().to_string();
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq();
        inner
            .items
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), StoredDocument { seq, fields });
        Ok(id)
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        query.validate()?;
        let inner = self.inner.read().await;
        let mut matched: Vec<(u64, Document)> = inner
            .items
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, stored)| query.matches(&stored.fields))
                    .map(|(id, stored)| {
                        (stored.seq, Document::new(id.clone(), stored.fields.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        drop(inner);

        matched.sort_by_key(|(seq, _)| *seq);
        let mut documents: Vec<Document> = matched.into_iter().map(|(_, d)| d).collect();
        if let Some(order) = &query.order_by {
            sort_documents(&mut documents, order);
        }
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|stored| Document::new(id, stored.fields.clone())))
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        let seq = match inner.items.get(collection).and_then(|docs| docs.get(id)) {
            Some(existing) => existing.seq,
            None => inner.next_seq(),
        };
        inner
            .items
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), StoredDocument { seq, fields });
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.check_available()?;
        for field in fields.keys() {
            validate_field_name(field)?;
        }
        let mut inner = self.inner.write().await;
        let stored = inner
            .items
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::MissingDocument {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        stored.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        if let Some(docs) = inner.items.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.get("orders", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_then_query_by_two_fields() {
        let store = MemoryDocumentStore::new();
        store
            .add("loves", fields(json!({ "appId": "app-1", "deviceId": "a" })))
            .await
            .unwrap();
        let id = store
            .add("loves", fields(json!({ "appId": "app-1", "deviceId": "b" })))
            .await
            .unwrap();
        let query = Query::new()
            .filter_eq("appId", "app-1")
            .filter_eq("deviceId", "b");
        let docs = store.query("loves", &query).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(
            store
                .count("loves", &Query::new().filter_eq("appId", "app-1"))
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_update_keeps_sibling_fields() {
        let store = MemoryDocumentStore::new();
        store
            .set("analytics", "appViews", fields(json!({ "a": 3, "b": 1 })))
            .await
            .unwrap();
        store
            .update("analytics", "appViews", fields(json!({ "b": 2 })))
            .await
            .unwrap();
        let doc = store.get("analytics", "appViews").await.unwrap().unwrap();
        assert_eq!(doc.get("a"), Some(&json!(3)));
        assert_eq!(doc.get("b"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update("analytics", "visits", fields(json!({ "count": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingDocument { .. }));
    }

    #[tokio::test]
    async fn test_set_replaces_whole_document() {
        let store = MemoryDocumentStore::new();
        store
            .set("analytics", "visits", fields(json!({ "count": 1, "extra": true })))
            .await
            .unwrap();
        store
            .set("analytics", "visits", fields(json!({ "count": 2 })))
            .await
            .unwrap();
        let doc = store.get("analytics", "visits").await.unwrap().unwrap();
        assert_eq!(doc.get("count"), Some(&json!(2)));
        assert_eq!(doc.get("extra"), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryDocumentStore::new();
        let id = store.add("loves", fields(json!({ "appId": "x" }))).await.unwrap();
        store.delete("loves", &id).await.unwrap();
        store.delete("loves", &id).await.unwrap();
        assert_eq!(store.get("loves", &id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryDocumentStore::new();
        store.set_unavailable(true);
        let err = store.get("orders", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        store.set_unavailable(false);
        assert!(store.get("orders", "x").await.is_ok());
    }
}
