use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{ActorKey, AggregateRoot, SubjectKey};

/// Идентификатор оценки
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingId(pub String);

impl RatingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Оценка приложения одним устройством.
///
/// На пару (приложение, устройство) должна приходиться одна запись, но
/// уникальность держится только на чтении перед записью.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: RatingId,
    #[serde(rename = "appId")]
    pub subject: SubjectKey,
    pub rating: u8,
    #[serde(rename = "deviceId")]
    pub actor: ActorKey,
    pub created_at: DateTime<Utc>,
}

impl AggregateRoot for Rating {
    fn collection_name() -> &'static str {
        "ratings"
    }
}

/// Запрос на выставление оценки
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub app_id: String,
    pub device_id: String,
    pub rating: i64,
}

/// Средняя оценка и число оценок приложения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub app_id: SubjectKey,
    pub average: f64,
    pub count: u64,
}
