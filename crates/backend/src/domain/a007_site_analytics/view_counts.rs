use contracts::domain::common::SubjectKey;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::shared::document_store::Fields;

/// Просмотры по приложениям из документа `appViews`.
///
/// Обход идёт в лексикографическом порядке ключей: от него зависит, кто
/// побеждает при равенстве в [`ViewCounts::most_viewed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCounts {
    counts: BTreeMap<SubjectKey, u64>,
}

impl ViewCounts {
    /// Разобрать документ; неверные ключи и нецелые значения пропускаются
    pub fn from_fields(fields: &Fields) -> Self {
        let mut counts = BTreeMap::new();
        for (raw_key, value) in fields {
            let key = match SubjectKey::parse(raw_key.clone()) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(key = %raw_key, error = %e, "skipping malformed view key");
                    continue;
                }
            };
            match value.as_u64() {
                Some(count) => {
                    counts.insert(key, count);
                }
                None => {
                    tracing::warn!(key = %raw_key, value = %value, "skipping non-integer view count");
                }
            }
        }
        Self { counts }
    }

    pub fn get(&self, subject: &SubjectKey) -> u64 {
        self.counts.get(subject).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubjectKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Линейный проход; при равенстве побеждает первый ключ, достигший
    /// максимума
    pub fn most_viewed(&self) -> Option<(SubjectKey, u64)> {
        let mut best: Option<(&SubjectKey, u64)> = None;
        for (key, count) in self.iter() {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(|(key, count)| (key.clone(), count))
    }
}

/// Текущее значение счётчика поля; отсутствующее или битое значение это 0
pub fn count_of(fields: &Fields, field: &str) -> u64 {
    fields.get(field).and_then(Value::as_u64).unwrap_or(0)
}
