use tokio::sync::MutexGuard;
use tracing::{debug, info, instrument};

use crate::domain::{
    authentication::ports::AuthClient,
    common::{
        entities::{app_errors::CoreError, synced::Synced},
        services::Service,
    },
    favorite::{entities::FavoriteSet, ports::FavoriteService},
    food::{entities::FoodRecord, ports::FoodRepository},
    preference::{
        FAVORITES_KEY,
        ports::PreferenceStore,
        services::{load_json, save_json},
    },
    profile::ports::ProfileRepository,
};

impl<F, P, A, PR> Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    /// Locks the favorites mirror, loading it from the store on first use.
    /// The guard is held across the following write so that concurrent
    /// toggles persist one after another. A failed read leaves the mirror
    /// unloaded so the next call tries again.
    async fn favorites_mirror(
        &self,
    ) -> Result<MutexGuard<'_, Option<FavoriteSet>>, CoreError> {
        let mut guard = self.favorites.lock().await;
        if guard.is_none() {
            let loaded = load_json(&self.preference_store, FAVORITES_KEY).await?;
            *guard = Some(loaded.unwrap_or_default());
        }
        Ok(guard)
    }
}

impl<F, P, A, PR> FavoriteService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    async fn load_favorites(&self) -> FavoriteSet {
        let mut guard = self.favorites.lock().await;
        match load_json::<_, FavoriteSet>(&self.preference_store, FAVORITES_KEY).await {
            Ok(loaded) => {
                let loaded = loaded.unwrap_or_default();
                *guard = Some(loaded.clone());
                loaded
            }
            Err(_) => guard.clone().unwrap_or_default(),
        }
    }

    async fn is_favorite(&self, id: &str) -> bool {
        self.favorites_mirror()
            .await
            .is_ok_and(|guard| guard.as_ref().is_some_and(|set| set.contains(id)))
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn toggle_favorite(&self, record: FoodRecord) -> Synced<FavoriteSet> {
        let mut guard = match self.favorites_mirror().await {
            Ok(guard) => guard,
            Err(e) => return Synced::failed(FavoriteSet::default(), e),
        };
        let favorites = guard.get_or_insert_with(FavoriteSet::default);

        let now_favorite = favorites.toggle(record);
        let snapshot = favorites.clone();
        info!(now_favorite, count = snapshot.len(), "favorite toggled");

        let write = save_json(&self.preference_store, FAVORITES_KEY, &snapshot).await;

        Synced::from_write(snapshot, write)
    }

    async fn refresh_favorites(&self, records: Vec<FoodRecord>) -> Synced<FavoriteSet> {
        let mut guard = match self.favorites_mirror().await {
            Ok(guard) => guard,
            Err(e) => return Synced::failed(FavoriteSet::default(), e),
        };
        let favorites = guard.get_or_insert_with(FavoriteSet::default);

        let mut changed = false;
        for record in &records {
            changed |= favorites.refresh(record);
        }
        let snapshot = favorites.clone();

        if !changed {
            return Synced::unchanged(snapshot);
        }

        debug!("refreshing cached favorites");
        let write = save_json(&self.preference_store, FAVORITES_KEY, &snapshot).await;

        Synced::from_write(snapshot, write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{
            SearchConfig,
            entities::synced::Persistence,
            services::Service,
            test_utils::{build_service, sample_record},
        },
        preference::ports::PreferenceStore,
    };
    use crate::infrastructure::memory::{
        InMemoryAuthClient, InMemoryFoodRepository, InMemoryProfileRepository,
    };

    #[tokio::test]
    async fn test_load_without_blob_is_empty() {
        let service = build_service();

        let favorites = service.load_favorites().await;

        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_load_with_corrupt_blob_is_empty() {
        let service = build_service();
        service
            .preference_store
            .set(FAVORITES_KEY, "[{\"id\":".to_string())
            .await
            .unwrap();

        let favorites = service.load_favorites().await;

        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_is_persisted_for_the_next_session() {
        let service = build_service();
        let apple = sample_record("1", "Apple", 52.0);

        let synced = service.toggle_favorite(apple.clone()).await;
        assert_eq!(synced.persistence, Persistence::Committed);
        assert!(service.is_favorite("1").await);

        let next_session = Service::new(
            InMemoryFoodRepository::default(),
            service.preference_store.clone(),
            InMemoryAuthClient::default(),
            InMemoryProfileRepository::default(),
            SearchConfig::default(),
        );
        let favorites = next_session.load_favorites().await;
        assert_eq!(favorites.records(), &[apple]);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let service = build_service();
        let apple = sample_record("1", "Apple", 52.0);
        service.toggle_favorite(sample_record("2", "Banana", 89.0)).await;
        let before = service.load_favorites().await;

        service.toggle_favorite(apple.clone()).await;
        let after = service.toggle_favorite(apple).await;

        assert_eq!(after.value, before);
        assert_eq!(service.load_favorites().await, before);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_state() {
        let service = build_service();
        service.preference_store.fail_writes(true);

        let synced = service.toggle_favorite(sample_record("1", "Apple", 52.0)).await;

        assert!(!synced.is_persisted());
        assert!(matches!(synced.persistence, Persistence::Failed(_)));
        assert!(synced.value.contains("1"));
        assert!(service.is_favorite("1").await);
    }

    #[tokio::test]
    async fn test_unreadable_store_is_never_overwritten() {
        let service = build_service();
        let apple = sample_record("1", "Apple", 52.0);
        let banana = sample_record("2", "Banana", 89.0);
        let kiwi = sample_record("3", "Kiwi", 61.0);
        let saved = Service::new(
            InMemoryFoodRepository::default(),
            service.preference_store.clone(),
            InMemoryAuthClient::default(),
            InMemoryProfileRepository::default(),
            SearchConfig::default(),
        );
        saved.toggle_favorite(apple.clone()).await;
        saved.toggle_favorite(banana.clone()).await;
        service.preference_store.fail_reads(true);

        let synced = service.toggle_favorite(kiwi.clone()).await;
        assert!(matches!(
            synced.persistence,
            Persistence::Failed(CoreError::StorageError(_))
        ));
        assert!(!service.is_favorite("1").await);

        service.preference_store.fail_reads(false);
        assert!(service.is_favorite("1").await);

        let synced = service.toggle_favorite(kiwi.clone()).await;
        assert_eq!(synced.persistence, Persistence::Committed);
        assert_eq!(
            service.load_favorites().await.records(),
            &[apple, banana, kiwi]
        );
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_ids_unique() {
        let service = build_service();
        let apple = sample_record("1", "Apple", 52.0);
        let banana = sample_record("2", "Banana", 89.0);

        tokio::join!(
            service.toggle_favorite(apple.clone()),
            service.toggle_favorite(banana.clone()),
            service.toggle_favorite(apple.clone()),
        );

        let favorites = service.load_favorites().await;
        assert_eq!(favorites.records(), &[banana]);
    }

    #[tokio::test]
    async fn test_refresh_without_change_skips_write() {
        let service = build_service();
        let apple = sample_record("1", "Apple", 52.0);
        service.toggle_favorite(apple.clone()).await;
        service.preference_store.fail_writes(true);

        let unchanged = service.refresh_favorites(vec![apple.clone()]).await;
        assert_eq!(unchanged.persistence, Persistence::Unchanged);

        let lighter = FoodRecord {
            calories: 40.0,
            ..apple
        };
        let changed = service.refresh_favorites(vec![lighter]).await;
        assert!(matches!(changed.persistence, Persistence::Failed(_)));
        assert_eq!(changed.value.records()[0].calories, 40.0);
    }
}
