use serde::{Deserialize, Serialize};

/// Статусы пожертвования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Completed,
}

impl DonationStatus {
    pub fn code(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "Pending",
            DonationStatus::Completed => "Completed",
        }
    }

    pub fn all() -> Vec<DonationStatus> {
        vec![DonationStatus::Pending, DonationStatus::Completed]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(DonationStatus::Pending),
            "completed" => Some(DonationStatus::Completed),
            _ => None,
        }
    }
}

impl Default for DonationStatus {
    fn default() -> Self {
        DonationStatus::Pending
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
