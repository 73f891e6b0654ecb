use std::future::Future;

use crate::domain::common::entities::synced::Synced;

pub trait SearchHistoryService: Send + Sync {
    fn load_recent_searches(&self) -> impl Future<Output = Vec<String>> + Send;

    /// Records a committed search. Blank terms leave the list untouched.
    fn record_search(&self, term: String) -> impl Future<Output = Synced<Vec<String>>> + Send;

    fn clear_recent_searches(&self) -> impl Future<Output = Synced<Vec<String>>> + Send;

    fn remove_recent_search(
        &self,
        index: usize,
    ) -> impl Future<Output = Synced<Vec<String>>> + Send;
}
