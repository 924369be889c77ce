use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::check_document_id;
use crate::domain::common::validation::{require_email, require_non_empty};
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::enums::order_status::OrderStatus;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор заказа (назначается хранилищем)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for OrderId {
    fn from_string(s: &str) -> Result<Self, String> {
        check_document_id(s).map(OrderId::new)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заказ на разработку, оставленный через форму на сайте
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub business_type: String,
    pub services: Vec<String>,
    pub project_description: String,
    pub target_audience: String,
    pub design_style: String,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Создать новый заказ для вставки в хранилище (статус `new`)
    pub fn new_for_insert(dto: OrderDto) -> Self {
        Self {
            id: OrderId::default(),
            full_name: dto.full_name,
            email: dto.email,
            phone: dto.phone,
            business_name: dto.business_name.filter(|s| !s.trim().is_empty()),
            business_type: dto.business_type,
            services: dto.services,
            project_description: dto.project_description,
            target_audience: dto.target_audience,
            design_style: dto.design_style,
            timeline: dto.timeline,
            budget_range: dto.budget_range,
            additional_notes: dto.additional_notes,
            status: OrderStatus::New,
            created_at: Utc::now(),
        }
    }
}

impl AggregateRoot for Order {
    fn collection_name() -> &'static str {
        "orders"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Данные формы заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub business_name: Option<String>,
    pub business_type: String,
    pub services: Vec<String>,
    pub project_description: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub design_style: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

impl OrderDto {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty("fullName", &self.full_name)?;
        require_email(&self.email)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("businessType", &self.business_type)?;
        require_non_empty("projectDescription", &self.project_description)?;
        if self.services.iter().all(|s| s.trim().is_empty()) {
            return Err("At least one service must be selected".into());
        }
        Ok(())
    }
}

/// Запрос на смену статуса заказа (код из `OrderStatus::code`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
