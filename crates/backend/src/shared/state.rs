use std::sync::Arc;

use crate::engagement::{AtomicApply, EngagementAggregator};
use crate::shared::config::{get_database_path, Config, StorageEngine, TrackedSubject};
use crate::shared::data::db::initialize_database;
use crate::shared::document_store::{DocumentStore, MemoryDocumentStore};

/// Общее состояние обработчиков: хранилище (через агрегатор) и список
/// приложений для страницы аналитики
#[derive(Clone)]
pub struct AppState {
    pub aggregator: EngagementAggregator,
    pub subjects: Arc<Vec<TrackedSubject>>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.database.engine {
            StorageEngine::Sqlite => {
                let db_path = get_database_path(config);
                Arc::new(initialize_database(&db_path).await?)
            }
            StorageEngine::Memory => {
                tracing::warn!("Using in-memory document store, data is lost on restart");
                Arc::new(MemoryDocumentStore::new())
            }
        };
        let apply = AtomicApply::from_mode(config.analytics.consistency);
        let subjects = config.analytics.tracked_subjects()?;
        tracing::info!(
            "Analytics: {} subjects, consistency strategy '{}'",
            subjects.len(),
            apply.strategy()
        );
        Ok(Self::with_store(store, apply, subjects))
    }

    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        apply: AtomicApply,
        subjects: Vec<TrackedSubject>,
    ) -> Self {
        Self {
            aggregator: EngagementAggregator::new(store, apply),
            subjects: Arc::new(subjects),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.aggregator.store()
    }
}
