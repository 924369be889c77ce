use chrono::Utc;
use contracts::domain::a002_rating::aggregate::{Rating, RatingId};
use contracts::domain::common::validation::require_stars;
use contracts::domain::common::{ActorKey, SubjectKey};

use super::EngagementAggregator;
use crate::domain::a002_rating::repository;
use crate::shared::document_store::{DocumentStore, StoreError};
use crate::shared::error::{DomainError, DomainResult};

impl EngagementAggregator {
    /// Выставить оценку от устройства. Если оценка уже есть, перезаписываются
    /// значение и время и возвращается её id; иначе создаётся новая запись.
    ///
    /// Known gap: без блокирующей стратегии два параллельных вызова для одной
    /// пары могут оба не найти запись и оба её вставить.
    pub async fn record_or_get_rating(
        &self,
        subject: &SubjectKey,
        actor: &ActorKey,
        value: i64,
    ) -> DomainResult<RatingId> {
        let stars = require_stars(value).map_err(DomainError::Validation)?;
        let store = self.store();
        let key = format!("ratings/{}/{}", subject, actor);
        let id = self
            .apply
            .run(&key, move || record_rating(store, subject, actor, stars))
            .await?;
        Ok(id)
    }

    pub async fn get_user_rating(
        &self,
        subject: &SubjectKey,
        actor: &ActorKey,
    ) -> DomainResult<Option<Rating>> {
        Ok(repository::find_by_subject_and_actor(self.store(), subject, actor).await?)
    }

    /// Среднее арифметическое; без оценок 0
    pub async fn average_rating(&self, subject: &SubjectKey) -> DomainResult<f64> {
        let ratings = repository::list_by_subject(self.store(), subject).await?;
        if ratings.is_empty() {
            return Ok(0.0);
        }
        let total: u64 = ratings.iter().map(|r| u64::from(r.rating)).sum();
        Ok(total as f64 / ratings.len() as f64)
    }

    pub async fn rating_count(&self, subject: &SubjectKey) -> DomainResult<u64> {
        Ok(repository::count_by_subject(self.store(), subject).await?)
    }
}

async fn record_rating(
    store: &dyn DocumentStore,
    subject: &SubjectKey,
    actor: &ActorKey,
    stars: u8,
) -> Result<RatingId, StoreError> {
    let now = Utc::now();
    match repository::find_by_subject_and_actor(store, subject, actor).await? {
        Some(existing) => {
            repository::update_value(store, &existing.id, stars, now).await?;
            tracing::debug!(rating_id = %existing.id.value(), %subject, %actor, stars, "rating overwritten");
            Ok(existing.id)
        }
        None => {
            let rating = Rating {
                id: RatingId::default(),
                subject: subject.clone(),
                rating: stars,
                actor: actor.clone(),
                created_at: now,
            };
            let id = repository::insert(store, &rating).await?;
            tracing::debug!(rating_id = %id.value(), %subject, %actor, stars, "rating created");
            Ok(id)
        }
    }
}
