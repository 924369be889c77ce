pub mod a001_order;
pub mod a002_rating;
pub mod a003_review;
pub mod a004_love;
pub mod a005_donation;
pub mod a006_contact_submission;
pub mod a007_site_analytics;
pub mod dashboard;

use axum::http::StatusCode;
use contracts::domain::common::{ActorKey, AggregateId, SubjectKey};

use crate::shared::error::DomainError;

/// Залогировать ошибку операции и вернуть соответствующий статус
pub(crate) fn error_status(operation: &str, e: DomainError) -> StatusCode {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::error!("{} failed: {}", operation, e);
    } else {
        tracing::warn!("{} rejected: {}", operation, e);
    }
    status
}

pub(crate) fn parse_subject(raw: String) -> Result<SubjectKey, StatusCode> {
    SubjectKey::parse(raw).map_err(|e| error_status("parse appId", e.into()))
}

pub(crate) fn parse_actor(raw: String) -> Result<ActorKey, StatusCode> {
    ActorKey::parse(raw).map_err(|e| error_status("parse deviceId", e.into()))
}

/// Идентификатор документа из сегмента пути
pub(crate) fn parse_id<T: AggregateId>(raw: &str) -> Result<T, StatusCode> {
    T::from_string(raw).map_err(|e| error_status("parse id", DomainError::Validation(e)))
}

/// Код статуса из тела запроса; неизвестный код — ошибка валидации
pub(crate) fn parse_status<T>(
    code: &str,
    from_code: impl FnOnce(&str) -> Option<T>,
) -> Result<T, StatusCode> {
    from_code(code).ok_or_else(|| {
        error_status(
            "parse status",
            DomainError::Validation(format!("Unknown status: {}", code)),
        )
    })
}
