use serde::{Deserialize, Serialize};

/// Статусы заказа
///
/// Обычный путь `new -> in-progress -> completed`, но переходы не
/// проверяются: администратор может выставить любой статус в любой момент.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl OrderStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Completed,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(OrderStatus::New),
            "in-progress" => Some(OrderStatus::InProgress),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::New
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde() {
        for status in OrderStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::from_code("archived"), None);
    }
}
