use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::check_document_id;
use crate::domain::common::validation::{require_email, require_non_empty};
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::enums::donation_status::DonationStatus;

/// Идентификатор пожертвования
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationId(pub String);

impl DonationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for DonationId {
    fn from_string(s: &str) -> Result<Self, String> {
        check_document_id(s).map(DonationId::new)
    }
}

/// Пожертвование
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    pub full_name: String,
    pub email: String,
    pub amount: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Новое пожертвование всегда в статусе `pending`
    pub fn new_for_insert(dto: DonationDto) -> Self {
        Self {
            id: DonationId::default(),
            full_name: dto.full_name,
            email: dto.email,
            amount: dto.amount,
            reason: dto.reason,
            message: dto.message.filter(|m| !m.trim().is_empty()),
            status: DonationStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

impl AggregateRoot for Donation {
    fn collection_name() -> &'static str {
        "donations"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDto {
    pub full_name: String,
    pub email: String,
    pub amount: f64,
    pub reason: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl DonationDto {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty("fullName", &self.full_name)?;
        require_email(&self.email)?;
        require_non_empty("reason", &self.reason)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(format!("Amount must be positive, got {}", self.amount));
        }
        Ok(())
    }
}

/// Запрос на смену статуса пожертвования (код из `DonationStatus::code`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        let mut dto = DonationDto {
            full_name: "Sam".into(),
            email: "sam@example.org".into(),
            amount: 25.0,
            reason: "Support".into(),
            message: None,
        };
        assert!(dto.validate().is_ok());
        dto.amount = 0.0;
        assert!(dto.validate().is_err());
        dto.amount = f64::NAN;
        assert!(dto.validate().is_err());
    }
}
