use contracts::domain::a005_donation::aggregate::{Donation, DonationDto, DonationId};
use contracts::enums::donation_status::DonationStatus;

use super::repository;
use crate::shared::document_store::DocumentStore;
use crate::shared::error::{DomainError, DomainResult};

/// Новое пожертвование попадает в список со статусом `pending`
pub async fn create(store: &dyn DocumentStore, dto: DonationDto) -> DomainResult<Donation> {
    dto.validate().map_err(DomainError::Validation)?;

    let mut donation = Donation::new_for_insert(dto);
    donation.id = repository::insert(store, &donation).await?;
    tracing::info!(donation_id = %donation.id.value(), amount = donation.amount, "donation recorded");
    Ok(donation)
}

pub async fn list_all(store: &dyn DocumentStore) -> DomainResult<Vec<Donation>> {
    Ok(repository::list_all(store).await?)
}

pub async fn update_status(
    store: &dyn DocumentStore,
    id: &DonationId,
    status: DonationStatus,
) -> DomainResult<()> {
    repository::update_status(store, id, status).await?;
    tracing::info!(donation_id = %id.value(), status = %status, "donation status changed");
    Ok(())
}
