//! Агрегатор вовлечённости: оценки, лайки, счётчики визитов и просмотров.
//!
//! Операции сочетают чтение и запись документов. Каждая цепочка
//! "прочитать-изменить-записать" выполняется через [`AtomicApply`], поэтому
//! гарантии согласованности задаются стратегией, а не этим модулем.

pub mod atomic;
mod counters;
mod loves;
mod ratings;

use std::fmt;
use std::sync::Arc;

pub use atomic::AtomicApply;

use crate::shared::document_store::DocumentStore;

#[derive(Clone)]
pub struct EngagementAggregator {
    store: Arc<dyn DocumentStore>,
    apply: AtomicApply,
}

impl EngagementAggregator {
    pub fn new(store: Arc<dyn DocumentStore>, apply: AtomicApply) -> Self {
        Self { store, apply }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for EngagementAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngagementAggregator")
            .field("apply", &self.apply)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::document_store::memory::MemoryDocumentStore;
    use crate::shared::document_store::{Document, Fields, Query, StoreError};
    use crate::shared::error::DomainError;
    use async_trait::async_trait;
    use contracts::domain::common::{ActorKey, SubjectKey};
    use std::time::Duration;
    use tokio::task::JoinSet;

    fn subject(s: &str) -> SubjectKey {
        SubjectKey::parse(s).unwrap()
    }

    fn actor(s: &str) -> ActorKey {
        ActorKey::parse(s).unwrap()
    }

    fn aggregator_with(store: Arc<MemoryDocumentStore>, apply: AtomicApply) -> EngagementAggregator {
        EngagementAggregator::new(store, apply)
    }

    fn aggregator() -> (Arc<MemoryDocumentStore>, EngagementAggregator) {
        let store = Arc::new(MemoryDocumentStore::new());
        (store.clone(), aggregator_with(store, AtomicApply::non_atomic()))
    }

    /// Хранилище, которое задерживает чтения: все параллельные цепочки
    /// успевают прочитать до первой записи
    struct SlowReads {
        inner: MemoryDocumentStore,
        delay: Duration,
    }

    #[async_trait]
    impl DocumentStore for SlowReads {
        async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
            self.inner.add(collection, fields).await
        }

        async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
            let result = self.inner.query(collection, query).await;
            tokio::time::sleep(self.delay).await;
            result
        }

        async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
            let result = self.inner.get(collection, id).await;
            tokio::time::sleep(self.delay).await;
            result
        }

        async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
            self.inner.set(collection, id, fields).await
        }

        async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
            self.inner.update(collection, id, fields).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
            self.inner.delete(collection, id).await
        }
    }

    fn slow_aggregator(apply: AtomicApply) -> EngagementAggregator {
        let store = SlowReads {
            inner: MemoryDocumentStore::new(),
            delay: Duration::from_millis(20),
        };
        EngagementAggregator::new(Arc::new(store), apply)
    }

    /// Оба хранилища: сценарии должны давать одинаковый результат
    async fn stores() -> Vec<(&'static str, Arc<dyn DocumentStore>)> {
        let sqlite = connect_in_memory().await.expect("in-memory sqlite");
        vec![
            ("memory", Arc::new(MemoryDocumentStore::new())),
            ("sqlite", Arc::new(sqlite)),
        ]
    }

    #[tokio::test]
    async fn test_scenario_visits_from_empty_store() {
        for (name, store) in stores().await {
            let agg = EngagementAggregator::new(store, AtomicApply::non_atomic());
            assert_eq!(agg.total_visits().await.unwrap(), 0, "{name}");
            agg.increment_visits().await.unwrap();
            assert_eq!(agg.total_visits().await.unwrap(), 1, "{name}");
            agg.increment_visits().await.unwrap();
            assert_eq!(agg.total_visits().await.unwrap(), 2, "{name}");
        }
    }

    #[tokio::test]
    async fn test_scenario_love_toggle_for_app_1() {
        for (name, store) in stores().await {
            let agg = EngagementAggregator::new(store, AtomicApply::non_atomic());
            let app = subject("app-1");
            let device = actor("device-a");

            assert!(!agg.has_loved(&app, &device).await.unwrap(), "{name}");
            assert!(agg.toggle_love(&app, &device).await.unwrap(), "{name}");
            assert_eq!(agg.love_count(&app).await.unwrap(), 1, "{name}");
            assert!(!agg.toggle_love(&app, &device).await.unwrap(), "{name}");
            assert_eq!(agg.love_count(&app).await.unwrap(), 0, "{name}");
        }
    }

    #[tokio::test]
    async fn test_scenario_ratings_3_and_5_for_app_1() {
        for (name, store) in stores().await {
            let agg = EngagementAggregator::new(store, AtomicApply::non_atomic());
            let app = subject("app-1");
            agg.record_or_get_rating(&app, &actor("device-a"), 3).await.unwrap();
            agg.record_or_get_rating(&app, &actor("device-b"), 5).await.unwrap();

            assert_eq!(agg.average_rating(&app).await.unwrap(), 4.0, "{name}");
            assert_eq!(agg.rating_count(&app).await.unwrap(), 2, "{name}");

            // повторная оценка того же устройства заменяет прежнюю
            agg.record_or_get_rating(&app, &actor("device-a"), 5).await.unwrap();
            assert_eq!(agg.average_rating(&app).await.unwrap(), 5.0, "{name}");
            assert_eq!(agg.rating_count(&app).await.unwrap(), 2, "{name}");
        }
    }

    #[tokio::test]
    async fn test_most_viewed_with_n_and_m_views() {
        for (name, store) in stores().await {
            let agg = EngagementAggregator::new(store, AtomicApply::non_atomic());
            let s = subject("weather-go");
            let t = subject("drop-to-drop");
            for _ in 0..5 {
                agg.increment_subject_view(&s).await.unwrap();
            }
            for _ in 0..3 {
                agg.increment_subject_view(&t).await.unwrap();
            }

            assert_eq!(agg.most_viewed_subject().await.unwrap(), Some((s, 5)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_dotted_subject_key_counts_on_both_stores() {
        for (name, store) in stores().await {
            let agg = EngagementAggregator::new(store, AtomicApply::non_atomic());
            let dotted = subject("app.v2");
            let plain = subject("app");

            agg.increment_subject_view(&dotted).await.unwrap();
            agg.increment_subject_view(&dotted).await.unwrap();
            agg.increment_subject_view(&plain).await.unwrap();
            let views = agg.subject_views().await.unwrap();
            assert_eq!(views.get(&dotted), 2, "{name}");
            assert_eq!(views.get(&plain), 1, "{name}");

            agg.record_or_get_rating(&dotted, &actor("device.a"), 4).await.unwrap();
            assert_eq!(agg.rating_count(&dotted).await.unwrap(), 1, "{name}");
            assert_eq!(agg.rating_count(&plain).await.unwrap(), 0, "{name}");
            assert!(agg.toggle_love(&dotted, &actor("device.a")).await.unwrap(), "{name}");
            assert!(agg.has_loved(&dotted, &actor("device.a")).await.unwrap(), "{name}");
        }
    }

    #[tokio::test]
    async fn test_average_of_two_ratings() {
        let (_, agg) = aggregator();
        let app = subject("drop-to-drop");
        agg.record_or_get_rating(&app, &actor("d1"), 3).await.unwrap();
        agg.record_or_get_rating(&app, &actor("d2"), 5).await.unwrap();

        assert_eq!(agg.average_rating(&app).await.unwrap(), 4.0);
        assert_eq!(agg.rating_count(&app).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_average_without_ratings_is_zero() {
        let (_, agg) = aggregator();
        let app = subject("weather-go");
        assert_eq!(agg.average_rating(&app).await.unwrap(), 0.0);
        assert_eq!(agg.rating_count(&app).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_second_rating_overwrites_first() {
        let (_, agg) = aggregator();
        let app = subject("drop-to-drop");
        let device = actor("d1");

        let first = agg.record_or_get_rating(&app, &device, 2).await.unwrap();
        let second = agg.record_or_get_rating(&app, &device, 5).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(agg.rating_count(&app).await.unwrap(), 1);
        let stored = agg.get_user_rating(&app, &device).await.unwrap().unwrap();
        assert_eq!(stored.rating, 5);
        assert_eq!(agg.average_rating(&app).await.unwrap(), 5.0);
    }

    #[tokio::test]
    async fn test_rating_is_scoped_to_subject() {
        let (_, agg) = aggregator();
        let device = actor("d1");
        agg.record_or_get_rating(&subject("a"), &device, 1).await.unwrap();
        agg.record_or_get_rating(&subject("b"), &device, 5).await.unwrap();

        assert_eq!(agg.average_rating(&subject("a")).await.unwrap(), 1.0);
        assert_eq!(agg.average_rating(&subject("b")).await.unwrap(), 5.0);
        assert!(agg.get_user_rating(&subject("c"), &device).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected_before_store() {
        let (store, agg) = aggregator();
        store.set_unavailable(true);
        let app = subject("drop-to-drop");

        for value in [0, 6, -1] {
            let err = agg.record_or_get_rating(&app, &actor("d1"), value).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "value {value}");
        }
    }

    #[tokio::test]
    async fn test_toggle_sequence() {
        let (_, agg) = aggregator();
        let app = subject("drop-to-drop");
        let device = actor("d1");

        assert!(agg.toggle_love(&app, &device).await.unwrap());
        assert!(agg.has_loved(&app, &device).await.unwrap());
        assert_eq!(agg.love_count(&app).await.unwrap(), 1);

        assert!(!agg.toggle_love(&app, &device).await.unwrap());
        assert!(!agg.has_loved(&app, &device).await.unwrap());
        assert_eq!(agg.love_count(&app).await.unwrap(), 0);

        assert!(agg.toggle_love(&app, &device).await.unwrap());
        assert_eq!(agg.love_count(&app).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_love_count_over_devices() {
        let (_, agg) = aggregator();
        let app = subject("liverton-notes");
        for device in ["d1", "d2", "d3"] {
            agg.toggle_love(&app, &actor(device)).await.unwrap();
        }
        agg.toggle_love(&app, &actor("d2")).await.unwrap();

        assert_eq!(agg.love_count(&app).await.unwrap(), 2);
        assert_eq!(agg.love_count(&subject("other")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sequential_visits_accumulate() {
        let (_, agg) = aggregator();
        assert_eq!(agg.total_visits().await.unwrap(), 0);

        for _ in 0..7 {
            agg.increment_visits().await.unwrap();
        }

        assert_eq!(agg.total_visits().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_most_viewed_after_n_views() {
        let (_, agg) = aggregator();
        let app = subject("weather-go");
        assert!(agg.most_viewed_subject().await.unwrap().is_none());

        for _ in 0..4 {
            agg.increment_subject_view(&app).await.unwrap();
        }

        assert_eq!(agg.most_viewed_subject().await.unwrap(), Some((app, 4)));
    }

    #[tokio::test]
    async fn test_view_increment_keeps_other_subjects() {
        let (_, agg) = aggregator();
        agg.increment_subject_view(&subject("b")).await.unwrap();
        agg.increment_subject_view(&subject("a")).await.unwrap();
        agg.increment_subject_view(&subject("b")).await.unwrap();

        let views = agg.subject_views().await.unwrap();
        assert_eq!(views.get(&subject("a")), 1);
        assert_eq!(views.get(&subject("b")), 2);
        assert_eq!(views.get(&subject("c")), 0);
    }

    #[tokio::test]
    async fn test_most_viewed_tie_takes_first_key() {
        let (_, agg) = aggregator();
        agg.increment_subject_view(&subject("zeta")).await.unwrap();
        agg.increment_subject_view(&subject("alpha")).await.unwrap();

        assert_eq!(
            agg.most_viewed_subject().await.unwrap(),
            Some((subject("alpha"), 1))
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (store, agg) = aggregator();
        store.set_unavailable(true);
        let app = subject("drop-to-drop");
        let device = actor("d1");

        assert!(matches!(
            agg.increment_visits().await,
            Err(DomainError::Store(StoreError::Backend(_)))
        ));
        assert!(agg.toggle_love(&app, &device).await.is_err());
        assert!(agg.record_or_get_rating(&app, &device, 4).await.is_err());
        assert!(agg.most_viewed_subject().await.is_err());
    }

    #[tokio::test]
    async fn test_non_atomic_visits_lose_updates() {
        let agg = slow_aggregator(AtomicApply::non_atomic());
        let mut tasks = JoinSet::new();
        for _ in 0..2 {
            let agg = agg.clone();
            tasks.spawn(async move { agg.increment_visits().await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(agg.total_visits().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_process_lock_keeps_every_visit() {
        let agg = slow_aggregator(AtomicApply::process_local());
        let mut tasks = JoinSet::new();
        for _ in 0..5 {
            let agg = agg.clone();
            tasks.spawn(async move { agg.increment_visits().await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(agg.total_visits().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_process_lock_keeps_every_view() {
        let agg = slow_aggregator(AtomicApply::process_local());
        let mut tasks = JoinSet::new();
        for name in ["a", "b", "a", "c", "a"] {
            let agg = agg.clone();
            let app = subject(name);
            tasks.spawn(async move { agg.increment_subject_view(&app).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let views = agg.subject_views().await.unwrap();
        assert_eq!(views.get(&subject("a")), 3);
        assert_eq!(views.get(&subject("b")), 1);
        assert_eq!(views.get(&subject("c")), 1);
    }

    #[tokio::test]
    async fn test_non_atomic_first_ratings_duplicate() {
        let agg = slow_aggregator(AtomicApply::non_atomic());
        let app = subject("drop-to-drop");
        let mut tasks = JoinSet::new();
        for value in [2, 4] {
            let agg = agg.clone();
            let app = app.clone();
            tasks.spawn(async move { agg.record_or_get_rating(&app, &actor("d1"), value).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(agg.rating_count(&app).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_process_lock_single_rating_per_pair() {
        let agg = slow_aggregator(AtomicApply::process_local());
        let app = subject("drop-to-drop");
        let mut tasks = JoinSet::new();
        for value in [2, 4, 5] {
            let agg = agg.clone();
            let app = app.clone();
            tasks.spawn(async move { agg.record_or_get_rating(&app, &actor("d1"), value).await });
        }
        let mut ids = Vec::new();
        while let Some(result) = tasks.join_next().await {
            ids.push(result.unwrap().unwrap());
        }

        assert_eq!(agg.rating_count(&app).await.unwrap(), 1);
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_process_lock_serializes_toggles() {
        let agg = slow_aggregator(AtomicApply::process_local());
        let app = subject("drop-to-drop");
        let mut tasks = JoinSet::new();
        for _ in 0..3 {
            let agg = agg.clone();
            let app = app.clone();
            tasks.spawn(async move { agg.toggle_love(&app, &actor("d1")).await });
        }
        let mut loved = 0;
        while let Some(result) = tasks.join_next().await {
            if result.unwrap().unwrap() {
                loved += 1;
            }
        }

        assert_eq!(loved, 2);
        assert_eq!(agg.love_count(&app).await.unwrap(), 1);
    }
}
