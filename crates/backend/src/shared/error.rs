use axum::http::StatusCode;
use contracts::domain::common::KeyError;
use thiserror::Error;

use crate::shared::document_store::StoreError;

/// Ошибки операций над сущностями и счётчиками.
///
/// Ошибки хранилища не переосмысляются и не повторяются, а передаются
/// вызывающему как есть.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<KeyError> for DomainError {
    fn from(e: KeyError) -> Self {
        DomainError::Validation(e.to_string())
    }
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Store(StoreError::MissingDocument { .. }) => StatusCode::NOT_FOUND,
            DomainError::Store(StoreError::InvalidField(_)) => StatusCode::BAD_REQUEST,
            DomainError::Store(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DomainError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::from(StoreError::MissingDocument {
                collection: "orders".into(),
                id: "1".into()
            })
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::from(StoreError::Backend("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            DomainError::from(KeyError::Empty).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
