use contracts::domain::common::SubjectKey;

use super::EngagementAggregator;
use crate::domain::a007_site_analytics::repository::{self, APP_VIEWS_DOC, COLLECTION, VISITS_DOC};
use crate::domain::a007_site_analytics::view_counts::{count_of, ViewCounts};
use crate::shared::document_store::{DocumentStore, StoreError};
use crate::shared::error::DomainResult;

fn singleton_key(doc: &str) -> String {
    format!("{}/{}", COLLECTION, doc)
}

impl EngagementAggregator {
    /// +1 к общему счётчику визитов.
    ///
    /// Чтение и запись разнесены: при параллельных вызовах без блокирующей
    /// стратегии обновления теряются (попытка хотя бы раз, не ровно один).
    pub async fn increment_visits(&self) -> DomainResult<()> {
        let store = self.store();
        self.apply
            .run(&singleton_key(VISITS_DOC), move || bump_visits(store))
            .await?;
        Ok(())
    }

    pub async fn total_visits(&self) -> DomainResult<u64> {
        Ok(repository::read_visits_doc(self.store())
            .await?
            .map(|doc| repository::visits_of(&doc))
            .unwrap_or(0))
    }

    /// +1 к просмотрам приложения в общем документе `appViews`. Пишется
    /// только поле этого приложения. Ключ блокировки общий на документ:
    /// первое создание документа заменяет его целиком.
    pub async fn increment_subject_view(&self, subject: &SubjectKey) -> DomainResult<()> {
        let store = self.store();
        self.apply
            .run(&singleton_key(APP_VIEWS_DOC), move || bump_view(store, subject))
            .await?;
        Ok(())
    }

    pub async fn subject_views(&self) -> DomainResult<ViewCounts> {
        Ok(repository::read_view_counts(self.store()).await?)
    }

    /// Самое просматриваемое приложение; при равенстве побеждает
    /// лексикографически первый ключ
    pub async fn most_viewed_subject(&self) -> DomainResult<Option<(SubjectKey, u64)>> {
        Ok(self.subject_views().await?.most_viewed())
    }
}

async fn bump_visits(store: &dyn DocumentStore) -> Result<(), StoreError> {
    match repository::read_visits_doc(store).await? {
        Some(doc) => {
            let next = repository::visits_of(&doc).saturating_add(1);
            repository::write_visits(store, next, true).await
        }
        None => repository::write_visits(store, 1, false).await,
    }
}

async fn bump_view(store: &dyn DocumentStore, subject: &SubjectKey) -> Result<(), StoreError> {
    match repository::read_views_doc(store).await? {
        Some(doc) => {
            let next = count_of(&doc.fields, subject.as_str()).saturating_add(1);
            repository::write_view(store, subject, next, true).await
        }
        None => repository::write_view(store, subject, 1, false).await,
    }
}
