use contracts::domain::a003_review::aggregate::{Review, ReviewDto};
use contracts::domain::common::SubjectKey;

use super::repository;
use crate::shared::document_store::DocumentStore;
use crate::shared::error::{DomainError, DomainResult};

pub async fn create(store: &dyn DocumentStore, dto: ReviewDto) -> DomainResult<Review> {
    let subject = SubjectKey::parse(dto.app_id.clone())?;
    let stars = dto.validate().map_err(DomainError::Validation)?;

    let mut review = Review::new_for_insert(subject, dto, stars);
    review.id = repository::insert(store, &review).await?;
    tracing::info!(review_id = %review.id.value(), app_id = %review.subject, "review added");
    Ok(review)
}

pub async fn list(store: &dyn DocumentStore, subject: Option<&SubjectKey>) -> DomainResult<Vec<Review>> {
    Ok(repository::list(store, subject).await?)
}
