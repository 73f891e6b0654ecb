use std::sync::atomic::Ordering;

use tracing::{debug, info, instrument};

use crate::domain::{
    authentication::ports::AuthClient,
    common::{entities::app_errors::CoreError, services::Service},
    favorite::ports::FavoriteService,
    food::{
        entities::{FoodRecord, FoodRecordPatch},
        ports::{FoodRepository, FoodService},
        value_objects::{AddFoodInput, SearchOutcome},
    },
    preference::ports::PreferenceStore,
    profile::ports::ProfileRepository,
};

impl<F, P, A, PR> Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    fn is_superseded(&self, ticket: u64) -> bool {
        self.search_sequence.load(Ordering::SeqCst) != ticket
    }
}

impl<F, P, A, PR> FoodService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    #[instrument(skip(self))]
    async fn search_foods(&self, query: String) -> Result<SearchOutcome, CoreError> {
        // Every call takes a ticket, including an empty query, so that
        // clearing the input also discards whatever is still in flight.
        let ticket = self.search_sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::Results(Vec::new()));
        }

        let debounce = self.search_config.debounce();
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        if self.is_superseded(ticket) {
            debug!(ticket, "search superseded before dispatch");
            return Ok(SearchOutcome::Superseded);
        }

        let response = self
            .food_repository
            .search(query, self.search_config.result_limit)
            .await;

        if self.is_superseded(ticket) {
            debug!(ticket, "discarding stale search response");
            return Ok(SearchOutcome::Superseded);
        }

        let records = response?;
        debug!(count = records.len(), "search results");

        self.refresh_favorites(records.clone()).await;

        Ok(SearchOutcome::Results(records))
    }

    #[instrument(skip(self))]
    async fn find_by_barcode(&self, barcode: String) -> Result<Option<FoodRecord>, CoreError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(CoreError::Validation("barcode is required".to_string()));
        }

        let record = self.food_repository.get_by_barcode(barcode).await?;
        if let Some(record) = &record {
            self.refresh_favorites(vec![record.clone()]).await;
        }

        Ok(record)
    }

    #[instrument(skip(self, input), fields(barcode = %input.barcode))]
    async fn add_food(&self, input: AddFoodInput) -> Result<FoodRecord, CoreError> {
        let new_record = input.into_new_record()?;

        let record = self.food_repository.insert(new_record).await?;

        info!(id = %record.id, name = %record.name, "food record created");

        Ok(record)
    }

    #[instrument(skip(self, patch))]
    async fn update_food(&self, id: String, patch: FoodRecordPatch) -> Result<FoodRecord, CoreError> {
        if id.trim().is_empty() {
            return Err(CoreError::Validation("id is required".to_string()));
        }
        if patch.is_empty() {
            return Err(CoreError::Validation("nothing to update".to_string()));
        }
        patch.validate()?;

        let record = self.food_repository.update(id.trim(), patch).await?;

        info!(id = %record.id, "food record updated");

        self.refresh_favorites(vec![record.clone()]).await;

        Ok(record)
    }
}
