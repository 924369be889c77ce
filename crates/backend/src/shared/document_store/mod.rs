//! Типизированный фасад над документным хранилищем.
//!
//! Коллекции адресуются по имени, документы по строковому id. Документ это
//! JSON-объект без поля `id`: идентификатор хранится отдельно и добавляется
//! обратно при декодировании в сущность.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use chrono::DateTime;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

/// Поля документа
pub type Fields = Map<String, Value>;

/// Ошибки хранилища.
///
/// После `Backend` состояние сущности неизвестно: запись могла как
/// примениться, так и нет.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Backend(String),

    #[error("document has unexpected shape: {0}")]
    Serialization(String),

    #[error("document {collection}/{id} does not exist")]
    MissingDocument { collection: String, id: String },

    #[error("invalid field: {0}")]
    InvalidField(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Документ, прочитанный из коллекции
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Декодировать документ в сущность, подставив `id`
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Закодировать сущность в поля документа (поле `id` отбрасывается)
pub fn encode<T: Serialize>(entity: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(entity)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        other => Err(StoreError::Serialization(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Имя поля попадает в JSON-путь SQLite, поэтому кавычки и управляющие
/// символы запрещены.
pub fn validate_field_name(field: &str) -> Result<(), StoreError> {
    if field.is_empty() || field == "id" {
        return Err(StoreError::InvalidField(format!("{:?}", field)));
    }
    if field
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_control())
    {
        return Err(StoreError::InvalidField(format!("{:?}", field)));
    }
    Ok(())
}

// ============================================================================
// Query
// ============================================================================

/// Фильтр на равенство значения поля
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// Запрос к коллекции: фильтры на равенство (все должны совпасть) и
/// необязательная сортировка по одному полю
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction: SortDirection::Descending,
        });
        self
    }

    pub fn order_by_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction: SortDirection::Ascending,
        });
        self
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        for filter in &self.filters {
            validate_field_name(&filter.field)?;
        }
        if let Some(order) = &self.order_by {
            validate_field_name(&order.field)?;
        }
        Ok(())
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters.iter().all(|f| match fields.get(&f.field) {
            Some(value) => value == &f.value,
            None => f.value.is_null(),
        })
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Порядок значений ключа сортировки: числа по величине, метки времени
/// RFC 3339 хронологически и перед прочими строками, прочие строки
/// лексикографически, пустые первыми.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            // метки времени идут раньше прочих строк, иначе порядок не транзитивен
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => x.cmp(y),
            }
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Стабильная сортировка: при равных ключах сохраняется порядок вставки
pub fn sort_documents(documents: &mut [Document], order: &OrderBy) {
    documents.sort_by(|a, b| {
        let ordering = compare_values(a.get(&order.field), b.get(&order.field));
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

// ============================================================================
// Store trait
// ============================================================================

/// Примитивы документного хранилища.
///
/// Ни одна операция не даёт транзакций поверх нескольких вызовов: чтение и
/// последующая запись могут перемежаться с чужими запросами.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Создать документ с идентификатором, назначенным хранилищем
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Документы коллекции, прошедшие все фильтры
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Документ по id; отсутствие документа это `Ok(None)`
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Создать или полностью заменить документ с заданным id
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Обновить только перечисленные поля существующего документа
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Удалить документ; удаление отсутствующего документа не ошибка
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Число документов, прошедших фильтры
    async fn count(&self, collection: &str, query: &Query) -> Result<u64, StoreError> {
        Ok(self.query(collection, query).await?.len() as u64)
    }
}
