//! Документное хранилище поверх встроенной SQLite.
//!
//! Все коллекции лежат в одной таблице `documents`, тело документа это JSON
//! в колонке `data`. Фильтры выполняются через `json_extract`, точечное
//! обновление полей через один оператор `json_set`, поэтому соседние ключи
//! документа не перетираются.

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set, Statement,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::{
    sort_documents, validate_field_name, Document, DocumentStore, Fields, Query, StoreError,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i64,
    pub collection: String,
    pub doc_id: String,
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    fn into_document(self) -> Result<Document, StoreError> {
        match serde_json::from_str::<JsonValue>(&self.data)? {
            JsonValue::Object(fields) => Ok(Document::new(self.doc_id, fields)),
            _ => Err(StoreError::Serialization(format!(
                "{}/{} is not a JSON object",
                self.collection, self.doc_id
            ))),
        }
    }
}

/// JSON-путь к полю верхнего уровня: `$."field"`
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

fn json_eq(field: &str, value: &JsonValue) -> Result<SimpleExpr, StoreError> {
    validate_field_name(field)?;
    let path = sea_orm::Value::from(json_path(field));
    let bound = match value {
        JsonValue::Null => {
            return Ok(Expr::cust_with_values(
                "json_extract(data, ?) IS NULL",
                [path],
            ))
        }
        // json_extract отдаёт true/false как 1/0
        JsonValue::Bool(b) => sea_orm::Value::from(i64::from(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => sea_orm::Value::from(i),
            None => sea_orm::Value::from(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => sea_orm::Value::from(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            return Err(StoreError::InvalidField(format!(
                "cannot filter {} by a composite value",
                field
            )))
        }
    };
    Ok(Expr::cust_with_values(
        "json_extract(data, ?) = ?",
        [path, bound],
    ))
}

const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        doc_id TEXT NOT NULL,
        data TEXT NOT NULL,
        UNIQUE(collection, doc_id)
    );
"#;

const UPSERT_DOCUMENT: &str = r#"
    INSERT INTO documents (collection, doc_id, data) VALUES (?, ?, ?)
    ON CONFLICT(collection, doc_id) DO UPDATE SET data = excluded.data;
"#;

#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    conn: DatabaseConnection,
}

impl SqliteDocumentStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Создать таблицу `documents`, если её ещё нет
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                CREATE_DOCUMENTS_TABLE.to_string(),
            ))
            .await?;
        Ok(())
    }

    fn select(&self, collection: &str, query: &Query) -> Result<Select<Entity>, StoreError> {
        let mut select = Entity::find().filter(Column::Collection.eq(collection));
        for filter in &query.filters {
            select = select.filter(json_eq(&filter.field, &filter.value)?);
        }
        Ok(select)
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let active = ActiveModel {
            seq: sea_orm::ActiveValue::NotSet,
            collection: Set(collection.to_string()),
            doc_id: Set(id.clone()),
            data: Set(serde_json::to_string(&fields)?),
        };
        active.insert(&self.conn).await?;
        Ok(id)
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        query.validate()?;
        let mut documents = self
            .select(collection, query)?
            .order_by_asc(Column::Seq)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Model::into_document)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(order) = &query.order_by {
            sort_documents(&mut documents, order);
        }
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Entity::find()
            .filter(Column::Collection.eq(collection))
            .filter(Column::DocId.eq(id))
            .one(&self.conn)
            .await?
            .map(Model::into_document)
            .transpose()
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let data = serde_json::to_string(&fields)?;
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                UPSERT_DOCUMENT,
                [
                    sea_orm::Value::from(collection),
                    sea_orm::Value::from(id),
                    sea_orm::Value::from(data),
                ],
            ))
            .await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        if fields.is_empty() {
            return match self.get(collection, id).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::MissingDocument {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }),
            };
        }

        let mut sql = String::from("UPDATE documents SET data = json_set(data");
        let mut values: Vec<sea_orm::Value> = Vec::with_capacity(fields.len() * 2 + 2);
        for (field, value) in &fields {
            validate_field_name(field)?;
            sql.push_str(", ?, json(?)");
            values.push(json_path(field).into());
            values.push(serde_json::to_string(value)?.into());
        }
        sql.push_str(") WHERE collection = ? AND doc_id = ?");
        values.push(collection.into());
        values.push(id.into());

        let result = self
            .conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                &sql,
                values,
            ))
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::MissingDocument {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        Entity::delete_many()
            .filter(Column::Collection.eq(collection))
            .filter(Column::DocId.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn count(&self, collection: &str, query: &Query) -> Result<u64, StoreError> {
        query.validate()?;
        Ok(self.select(collection, query)?.count(&self.conn).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    async fn store() -> SqliteDocumentStore {
        connect_in_memory().await.expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn test_add_get_and_missing() {
        let store = store().await;
        let id = store
            .add("orders", fields(json!({ "fullName": "Jane", "status": "new" })))
            .await
            .unwrap();
        let doc = store.get("orders", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("fullName"), Some(&json!("Jane")));
        assert_eq!(store.get("orders", "missing").await.unwrap(), None);
        // коллекции изолированы
        assert_eq!(store.get("donations", &id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let store = store().await;
        for (app, device, at) in [
            ("app-1", "a", "2025-01-01T00:00:00Z"),
            ("app-1", "b", "2025-01-03T00:00:00Z"),
            ("app-2", "a", "2025-01-02T00:00:00Z"),
        ] {
            store
                .add(
                    "ratings",
                    fields(json!({ "appId": app, "deviceId": device, "rating": 4, "createdAt": at })),
                )
                .await
                .unwrap();
        }

        let by_app = Query::new().filter_eq("appId", "app-1").order_by_desc("createdAt");
        let docs = store.query("ratings", &by_app).await.unwrap();
        let devices: Vec<_> = docs.iter().map(|d| d.get("deviceId").cloned()).collect();
        assert_eq!(devices, vec![Some(json!("b")), Some(json!("a"))]);

        let pair = Query::new().filter_eq("appId", "app-2").filter_eq("deviceId", "a");
        assert_eq!(store.count("ratings", &pair).await.unwrap(), 1);

        let by_number = Query::new().filter_eq("rating", 4);
        assert_eq!(store.count("ratings", &by_number).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_set_upserts_and_update_is_targeted() {
        let store = store().await;
        store
            .set("analytics", "appViews", fields(json!({ "app-1": 1 })))
            .await
            .unwrap();
        store
            .update("analytics", "appViews", fields(json!({ "app-2": 1 })))
            .await
            .unwrap();
        store
            .update("analytics", "appViews", fields(json!({ "app-1": 2 })))
            .await
            .unwrap();
        let doc = store.get("analytics", "appViews").await.unwrap().unwrap();
        assert_eq!(doc.get("app-1"), Some(&json!(2)));
        assert_eq!(doc.get("app-2"), Some(&json!(1)));

        store
            .set("analytics", "appViews", fields(json!({ "app-3": 7 })))
            .await
            .unwrap();
        let doc = store.get("analytics", "appViews").await.unwrap().unwrap();
        assert_eq!(doc.fields.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = store().await;
        let err = store
            .update("analytics", "visits", fields(json!({ "count": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingDocument { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store().await;
        let id = store.add("loves", fields(json!({ "appId": "x" }))).await.unwrap();
        store.delete("loves", &id).await.unwrap();
        store.delete("loves", &id).await.unwrap();
        assert_eq!(store.count("loves", &Query::new()).await.unwrap(), 0);
    }
}
