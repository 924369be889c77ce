use contracts::domain::a006_contact_submission::aggregate::{
    ContactSubmission, ContactSubmissionDto,
};

use super::repository;
use crate::shared::document_store::DocumentStore;
use crate::shared::error::{DomainError, DomainResult};

pub async fn create(
    store: &dyn DocumentStore,
    dto: ContactSubmissionDto,
) -> DomainResult<ContactSubmission> {
    dto.validate().map_err(DomainError::Validation)?;

    let mut submission = ContactSubmission::new_for_insert(dto);
    submission.id = repository::insert(store, &submission).await?;
    tracing::info!(contact_id = %submission.id.value(), "contact submission received");
    Ok(submission)
}

pub async fn list_all(store: &dyn DocumentStore) -> DomainResult<Vec<ContactSubmission>> {
    Ok(repository::list_all(store).await?)
}
