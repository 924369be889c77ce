use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов, приходящих извне (путь URL)
///
/// Идентификаторы документов назначаются хранилищем и всегда строковые,
/// поэтому `Copy` не требуется.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Разобрать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Проверка строкового идентификатора документа
pub(crate) fn check_document_id(s: &str) -> Result<&str, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Document id must not be empty".into());
    }
    if trimmed.contains('/') {
        return Err(format!("Invalid document id: {}", s));
    }
    Ok(trimmed)
}
