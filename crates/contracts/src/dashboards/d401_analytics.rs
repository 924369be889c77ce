use serde::{Deserialize, Serialize};

use crate::domain::common::SubjectKey;

/// Самый просматриваемый субъект
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostViewed {
    pub app_id: SubjectKey,
    pub name: String,
    pub count: u64,
}

/// Статистика по одному приложению
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub app_id: SubjectKey,
    pub name: String,
    pub views: u64,
    pub avg_rating: f64,
    pub rating_count: u64,
    pub love_count: u64,
}

/// Страница аналитики целиком
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_visits: u64,
    pub most_viewed: Option<MostViewed>,
    pub subjects: Vec<SubjectStats>,
}
