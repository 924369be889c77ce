use contracts::dashboards::d400_summary::DashboardSummary;

use crate::domain::{a001_order, a005_donation, a006_contact_submission};
use crate::engagement::EngagementAggregator;
use crate::shared::error::{DomainError, DomainResult};

/// Сводка главной страницы: четыре независимых чтения выполняются параллельно
pub async fn get_summary(aggregator: &EngagementAggregator) -> DomainResult<DashboardSummary> {
    let store = aggregator.store();

    let (total_orders, total_contacts, total_donations, total_visits) = tokio::try_join!(
        async { Ok::<_, DomainError>(a001_order::repository::count_all(store).await?) },
        async { Ok::<_, DomainError>(a006_contact_submission::repository::count_all(store).await?) },
        async { Ok::<_, DomainError>(a005_donation::repository::count_all(store).await?) },
        aggregator.total_visits(),
    )?;

    Ok(DashboardSummary {
        total_orders,
        total_contacts,
        total_donations,
        total_visits,
    })
}
