use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{ActorKey, AggregateRoot, SubjectKey};

/// Идентификатор лайка
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoveId(pub String);

impl LoveId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Лайк: наличие записи означает "нравится"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Love {
    pub id: LoveId,
    #[serde(rename = "appId")]
    pub subject: SubjectKey,
    #[serde(rename = "deviceId")]
    pub actor: ActorKey,
    pub created_at: DateTime<Utc>,
}

impl AggregateRoot for Love {
    fn collection_name() -> &'static str {
        "loves"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveToggleDto {
    pub app_id: String,
    pub device_id: String,
}

/// Состояние лайка после переключения
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveState {
    pub loved: bool,
    pub count: u64,
}
