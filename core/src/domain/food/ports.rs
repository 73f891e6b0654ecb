use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{
        entities::{FoodRecord, FoodRecordPatch, NewFoodRecord},
        value_objects::{AddFoodInput, SearchOutcome},
    },
};

/// Remote table of food records.
#[cfg_attr(test, mockall::automock)]
pub trait FoodRepository: Send + Sync {
    /// `Ok(None)` means the code is not registered; errors are reserved for
    /// failures to reach or query the store.
    fn get_by_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<Option<FoodRecord>, CoreError>> + Send;

    /// Case-insensitive substring match on the name, at most `limit` rows.
    fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<FoodRecord>, CoreError>> + Send;

    fn insert(
        &self,
        record: NewFoodRecord,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;

    fn update(
        &self,
        id: &str,
        patch: FoodRecordPatch,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;
}

pub trait FoodService: Send + Sync {
    /// Debounced search. Only the most recently started search may deliver
    /// results; older ones resolve to [`SearchOutcome::Superseded`].
    fn search_foods(
        &self,
        query: String,
    ) -> impl Future<Output = Result<SearchOutcome, CoreError>> + Send;

    /// Plain lookup, independent of the scanner.
    fn find_by_barcode(
        &self,
        barcode: String,
    ) -> impl Future<Output = Result<Option<FoodRecord>, CoreError>> + Send;

    fn add_food(
        &self,
        input: AddFoodInput,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;

    fn update_food(
        &self,
        id: String,
        patch: FoodRecordPatch,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;
}
