use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::validation::{require_email, require_non_empty};
use crate::domain::common::AggregateRoot;

/// Идентификатор обращения
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactSubmissionId(pub String);

impl ContactSubmissionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Сообщение из формы обратной связи
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: ContactSubmissionId,
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new_for_insert(dto: ContactSubmissionDto) -> Self {
        Self {
            id: ContactSubmissionId::default(),
            full_name: dto.full_name,
            email: dto.email,
            subject: dto.subject,
            message: dto.message,
            created_at: Utc::now(),
        }
    }
}

impl AggregateRoot for ContactSubmission {
    fn collection_name() -> &'static str {
        "contacts"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionDto {
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmissionDto {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty("fullName", &self.full_name)?;
        require_email(&self.email)?;
        require_non_empty("subject", &self.subject)?;
        require_non_empty("message", &self.message)
    }
}
