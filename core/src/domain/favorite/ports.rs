use std::future::Future;

use crate::domain::{
    common::entities::synced::Synced, favorite::entities::FavoriteSet,
    food::entities::FoodRecord,
};

pub trait FavoriteService: Send + Sync {
    /// Re-reads the persisted set. A missing or corrupt blob is an empty
    /// set, not an error.
    fn load_favorites(&self) -> impl Future<Output = FavoriteSet> + Send;

    fn is_favorite(&self, id: &str) -> impl Future<Output = bool> + Send;

    fn toggle_favorite(
        &self,
        record: FoodRecord,
    ) -> impl Future<Output = Synced<FavoriteSet>> + Send;

    /// Replaces cached copies of favorites with freshly fetched versions.
    /// Writes only when a copy actually changed.
    fn refresh_favorites(
        &self,
        records: Vec<FoodRecord>,
    ) -> impl Future<Output = Synced<FavoriteSet>> + Send;
}
