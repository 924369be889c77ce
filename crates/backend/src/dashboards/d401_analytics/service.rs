use contracts::dashboards::d401_analytics::{AnalyticsOverview, MostViewed, SubjectStats};
use contracts::domain::common::SubjectKey;
use tokio::task::JoinSet;

use crate::engagement::EngagementAggregator;
use crate::shared::config::TrackedSubject;
use crate::shared::error::{DomainError, DomainResult};

/// Страница аналитики: визиты, лидер по просмотрам и статистика по каждому
/// приложению из конфигурации (в порядке конфигурации).
pub async fn get_overview(
    aggregator: &EngagementAggregator,
    subjects: &[TrackedSubject],
) -> DomainResult<AnalyticsOverview> {
    let (total_visits, views) =
        tokio::try_join!(aggregator.total_visits(), aggregator.subject_views())?;

    let mut tasks = JoinSet::new();
    for (index, subject) in subjects.iter().enumerate() {
        let aggregator = aggregator.clone();
        let key = subject.key.clone();
        tasks.spawn(async move {
            let stats = tokio::try_join!(
                aggregator.average_rating(&key),
                aggregator.rating_count(&key),
                aggregator.love_count(&key),
            );
            (index, stats)
        });
    }

    let mut collected: Vec<Option<SubjectStats>> = vec![None; subjects.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, stats) = joined.map_err(|e| {
            tracing::error!("Analytics task failed: {}", e);
            DomainError::Internal(e.to_string())
        })?;
        let (avg_rating, rating_count, love_count) = stats?;
        let subject = &subjects[index];
        collected[index] = Some(SubjectStats {
            app_id: subject.key.clone(),
            name: subject.name.clone(),
            views: views.get(&subject.key),
            avg_rating,
            rating_count,
            love_count,
        });
    }

    let most_viewed = views.most_viewed().map(|(key, count)| MostViewed {
        name: display_name(subjects, &key),
        app_id: key,
        count,
    });

    Ok(AnalyticsOverview {
        total_visits,
        most_viewed,
        subjects: collected.into_iter().flatten().collect(),
    })
}

fn display_name(subjects: &[TrackedSubject], key: &SubjectKey) -> String {
    subjects
        .iter()
        .find(|s| &s.key == key)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::AtomicApply;
    use crate::shared::document_store::MemoryDocumentStore;
    use contracts::domain::common::ActorKey;
    use std::sync::Arc;

    fn tracked(id: &str, name: &str) -> TrackedSubject {
        TrackedSubject {
            key: SubjectKey::parse(id).unwrap(),
            name: name.to_string(),
        }
    }

    fn key(s: &str) -> SubjectKey {
        SubjectKey::parse(s).unwrap()
    }

    fn device(s: &str) -> ActorKey {
        ActorKey::parse(s).unwrap()
    }

    fn aggregator() -> EngagementAggregator {
        EngagementAggregator::new(Arc::new(MemoryDocumentStore::new()), AtomicApply::non_atomic())
    }

    #[tokio::test]
    async fn test_overview_of_empty_store() {
        let agg = aggregator();
        let subjects = vec![tracked("quiz", "Quiz"), tracked("notes", "Notes")];

        let overview = get_overview(&agg, &subjects).await.unwrap();

        assert_eq!(overview.total_visits, 0);
        assert!(overview.most_viewed.is_none());
        assert_eq!(overview.subjects.len(), 2);
        assert!(overview
            .subjects
            .iter()
            .all(|s| s.views == 0 && s.avg_rating == 0.0 && s.love_count == 0));
    }

    #[tokio::test]
    async fn test_overview_keeps_configured_order_and_stats() {
        let agg = aggregator();
        let subjects = vec![tracked("zeta", "Zeta App"), tracked("alpha", "Alpha App")];

        agg.increment_visits().await.unwrap();
        agg.increment_subject_view(&key("zeta")).await.unwrap();
        agg.increment_subject_view(&key("zeta")).await.unwrap();
        agg.increment_subject_view(&key("alpha")).await.unwrap();
        agg.record_or_get_rating(&key("alpha"), &device("d1"), 3).await.unwrap();
        agg.record_or_get_rating(&key("alpha"), &device("d2"), 5).await.unwrap();
        agg.toggle_love(&key("zeta"), &device("d1")).await.unwrap();

        let overview = get_overview(&agg, &subjects).await.unwrap();

        assert_eq!(overview.total_visits, 1);
        assert_eq!(
            overview.most_viewed,
            Some(MostViewed {
                app_id: key("zeta"),
                name: "Zeta App".into(),
                count: 2,
            })
        );
        let ids: Vec<&str> = overview.subjects.iter().map(|s| s.app_id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);

        let alpha = &overview.subjects[1];
        assert_eq!(alpha.views, 1);
        assert_eq!(alpha.avg_rating, 4.0);
        assert_eq!(alpha.rating_count, 2);
        assert_eq!(alpha.love_count, 0);
        assert_eq!(overview.subjects[0].love_count, 1);
    }

    #[tokio::test]
    async fn test_most_viewed_name_falls_back_to_key() {
        let agg = aggregator();
        agg.increment_subject_view(&key("untracked")).await.unwrap();

        let overview = get_overview(&agg, &[tracked("quiz", "Quiz")]).await.unwrap();

        let top = overview.most_viewed.unwrap();
        assert_eq!(top.name, "untracked");
        assert_eq!(top.count, 1);
    }

    #[tokio::test]
    async fn test_store_failure_fails_overview() {
        let store = Arc::new(MemoryDocumentStore::new());
        let agg = EngagementAggregator::new(store.clone(), AtomicApply::non_atomic());
        store.set_unavailable(true);

        let result = get_overview(&agg, &[tracked("quiz", "Quiz")]).await;
        assert!(matches!(result, Err(DomainError::Store(_))));
    }
}
