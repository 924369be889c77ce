use chrono::Utc;
use contracts::domain::a004_love::aggregate::{Love, LoveId};
use contracts::domain::common::{ActorKey, SubjectKey};

use super::EngagementAggregator;
use crate::domain::a004_love::repository;
use crate::shared::document_store::{DocumentStore, StoreError};
use crate::shared::error::DomainResult;

impl EngagementAggregator {
    /// Переключить лайк: `true` если теперь лайк стоит, `false` если снят.
    ///
    /// Known gap: без блокирующей стратегии параллельные переключения могут
    /// оставить ноль или две записи вместо одной.
    pub async fn toggle_love(&self, subject: &SubjectKey, actor: &ActorKey) -> DomainResult<bool> {
        let store = self.store();
        let key = format!("loves/{}/{}", subject, actor);
        let loved = self
            .apply
            .run(&key, move || flip_love(store, subject, actor))
            .await?;
        Ok(loved)
    }

    pub async fn love_count(&self, subject: &SubjectKey) -> DomainResult<u64> {
        Ok(repository::count_by_subject(self.store(), subject).await?)
    }

    pub async fn has_loved(&self, subject: &SubjectKey, actor: &ActorKey) -> DomainResult<bool> {
        Ok(repository::exists(self.store(), subject, actor).await?)
    }
}

async fn flip_love(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    actor: &ActorKey,
) -> Result<bool, StoreError> {
    match repository::find_by_subject_and_actor(store, subject, actor).await? {
        None => {
            let love = Love {
                id: LoveId::default(),
                subject: subject.clone(),
                actor: actor.clone(),
                created_at: Utc::now(),
            };
            repository::insert(store, &love).await?;
            tracing::debug!(%subject, %actor, "love added");
            Ok(true)
        }
        Some(existing) => {
            repository::delete(store, &existing.id).await?;
            tracing::debug!(%subject, %actor, "love removed");
            Ok(false)
        }
    }
}
