use tokio::sync::MutexGuard;
use tracing::{debug, instrument};

use crate::domain::{
    authentication::ports::AuthClient,
    common::{
        entities::{app_errors::CoreError, synced::Synced},
        services::Service,
    },
    food::ports::FoodRepository,
    preference::{
        RECENT_SEARCHES_KEY,
        ports::PreferenceStore,
        services::{load_json, save_json},
    },
    profile::ports::ProfileRepository,
    search_history::{entities::RecentSearchList, ports::SearchHistoryService},
};

impl<F, P, A, PR> Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    async fn read_recent_searches(&self) -> Result<RecentSearchList, CoreError> {
        let terms: Option<Vec<String>> =
            load_json(&self.preference_store, RECENT_SEARCHES_KEY).await?;

        Ok(RecentSearchList::from_terms(
            terms.unwrap_or_default(),
            self.search_config.recent_limit,
        ))
    }

    /// A failed read leaves the mirror unloaded so the next call tries again.
    async fn recent_searches_mirror(
        &self,
    ) -> Result<MutexGuard<'_, Option<RecentSearchList>>, CoreError> {
        let mut guard = self.recent_searches.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_recent_searches().await?);
        }
        Ok(guard)
    }
}

impl<F, P, A, PR> SearchHistoryService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    async fn load_recent_searches(&self) -> Vec<String> {
        let mut guard = self.recent_searches.lock().await;
        match self.read_recent_searches().await {
            Ok(loaded) => {
                let terms = loaded.terms().to_vec();
                *guard = Some(loaded);
                terms
            }
            Err(_) => guard
                .as_ref()
                .map(|recent| recent.terms().to_vec())
                .unwrap_or_default(),
        }
    }

    #[instrument(skip(self))]
    async fn record_search(&self, term: String) -> Synced<Vec<String>> {
        let limit = self.search_config.recent_limit;
        let mut guard = match self.recent_searches_mirror().await {
            Ok(guard) => guard,
            Err(e) => return Synced::failed(Vec::new(), e),
        };
        let recent = guard.get_or_insert_with(|| RecentSearchList::new(limit));

        if !recent.record(&term) {
            return Synced::unchanged(recent.terms().to_vec());
        }
        let terms = recent.terms().to_vec();
        debug!(count = terms.len(), "recent search recorded");

        let write = save_json(&self.preference_store, RECENT_SEARCHES_KEY, &terms).await;

        Synced::from_write(terms, write)
    }

    #[instrument(skip(self))]
    async fn clear_recent_searches(&self) -> Synced<Vec<String>> {
        let mut guard = self.recent_searches.lock().await;
        *guard = Some(RecentSearchList::new(self.search_config.recent_limit));

        let write = self.preference_store.remove(RECENT_SEARCHES_KEY).await;

        Synced::from_write(Vec::new(), write)
    }

    #[instrument(skip(self))]
    async fn remove_recent_search(&self, index: usize) -> Synced<Vec<String>> {
        let limit = self.search_config.recent_limit;
        let mut guard = match self.recent_searches_mirror().await {
            Ok(guard) => guard,
            Err(e) => return Synced::failed(Vec::new(), e),
        };
        let recent = guard.get_or_insert_with(|| RecentSearchList::new(limit));

        if recent.remove_at(index).is_none() {
            return Synced::unchanged(recent.terms().to_vec());
        }
        let terms = recent.terms().to_vec();

        let write = save_json(&self.preference_store, RECENT_SEARCHES_KEY, &terms).await;

        Synced::from_write(terms, write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{
        SearchConfig,
        entities::synced::Persistence,
        test_utils::{build_service, build_service_with},
    };

    fn terms(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_record_dedupes_and_prepends() {
        let service = build_service();
        service.record_search("apple".to_string()).await;

        let synced = service.record_search("banana".to_string()).await;
        assert_eq!(synced.value, terms(&["banana", "apple"]));

        let synced = service.record_search("apple".to_string()).await;
        assert_eq!(synced.value, terms(&["apple", "banana"]));
        assert_eq!(synced.persistence, Persistence::Committed);

        assert_eq!(
            service.load_recent_searches().await,
            terms(&["apple", "banana"])
        );
    }

    #[tokio::test]
    async fn test_blank_terms_are_not_written() {
        let service = build_service();
        service.record_search("apple".to_string()).await;
        service.preference_store.fail_writes(true);

        for blank in ["", "   "] {
            let synced = service.record_search(blank.to_string()).await;
            assert_eq!(synced.persistence, Persistence::Unchanged);
            assert_eq!(synced.value, terms(&["apple"]));
        }
    }

    #[tokio::test]
    async fn test_list_is_capped() {
        let service = build_service_with(SearchConfig {
            recent_limit: 3,
            ..SearchConfig::default()
        });

        for term in ["a", "b", "c", "d", "e"] {
            service.record_search(term.to_string()).await;
        }

        assert_eq!(service.load_recent_searches().await, terms(&["e", "d", "c"]));
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty() {
        let service = build_service();
        service
            .preference_store
            .set(RECENT_SEARCHES_KEY, "not json".to_string())
            .await
            .unwrap();

        assert!(service.load_recent_searches().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_the_key() {
        let service = build_service();
        service.record_search("apple".to_string()).await;

        let synced = service.clear_recent_searches().await;

        assert!(synced.value.is_empty());
        assert!(synced.is_persisted());
        assert_eq!(
            service.preference_store.get(RECENT_SEARCHES_KEY).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_remove_out_of_range_is_noop() {
        let service = build_service();
        service.record_search("apple".to_string()).await;
        service.record_search("banana".to_string()).await;

        let unchanged = service.remove_recent_search(5).await;
        assert_eq!(unchanged.persistence, Persistence::Unchanged);

        let removed = service.remove_recent_search(0).await;
        assert_eq!(removed.value, terms(&["apple"]));
        assert_eq!(service.load_recent_searches().await, terms(&["apple"]));
    }

    #[tokio::test]
    async fn test_unreadable_store_is_never_overwritten() {
        let service = build_service();
        service
            .preference_store
            .set(RECENT_SEARCHES_KEY, "[\"banana\",\"kiwi\"]".to_string())
            .await
            .unwrap();
        service.preference_store.fail_reads(true);

        let synced = service.record_search("apple".to_string()).await;
        assert!(matches!(
            synced.persistence,
            Persistence::Failed(CoreError::StorageError(_))
        ));
        let removed = service.remove_recent_search(0).await;
        assert!(matches!(removed.persistence, Persistence::Failed(_)));

        service.preference_store.fail_reads(false);
        let synced = service.record_search("apple".to_string()).await;
        assert_eq!(synced.persistence, Persistence::Committed);
        assert_eq!(
            service.load_recent_searches().await,
            terms(&["apple", "banana", "kiwi"])
        );
    }

    #[tokio::test]
    async fn test_zero_limit_still_keeps_the_latest_term() {
        let service = build_service_with(SearchConfig {
            recent_limit: 0,
            ..SearchConfig::default()
        });

        service.record_search("apple".to_string()).await;
        let synced = service.record_search("banana".to_string()).await;

        assert_eq!(synced.value, terms(&["banana"]));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_state() {
        let service = build_service();
        service.preference_store.fail_writes(true);

        let synced = service.record_search("apple".to_string()).await;

        assert!(matches!(synced.persistence, Persistence::Failed(_)));
        assert_eq!(synced.value, terms(&["apple"]));
    }
}
