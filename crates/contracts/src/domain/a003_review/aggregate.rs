use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{require_non_empty, require_stars};
use crate::domain::common::{AggregateRoot, SubjectKey};

/// Идентификатор отзыва
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Текстовый отзыв о приложении (только добавление)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    #[serde(rename = "appId")]
    pub subject: SubjectKey,
    pub user_name: String,
    pub review: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new_for_insert(subject: SubjectKey, dto: ReviewDto, rating: u8) -> Self {
        Self {
            id: ReviewId::default(),
            subject,
            user_name: dto.user_name.trim().to_string(),
            review: dto.review,
            rating,
            created_at: Utc::now(),
        }
    }
}

impl AggregateRoot for Review {
    fn collection_name() -> &'static str {
        "reviews"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub app_id: String,
    pub user_name: String,
    pub review: String,
    pub rating: i64,
}

impl ReviewDto {
    /// Проверяет форму и возвращает оценку в звёздах
    pub fn validate(&self) -> Result<u8, String> {
        require_non_empty("userName", &self.user_name)?;
        require_non_empty("review", &self.review)?;
        require_stars(self.rating)
    }
}
