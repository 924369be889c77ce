use serde::{Deserialize, Serialize};

/// Сводка для главной страницы админки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: u64,
    pub total_contacts: u64,
    pub total_donations: u64,
    pub total_visits: u64,
}
