use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;

use chrono::Utc;

use super::lock;
use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    food::{
        entities::{FoodRecord, FoodRecordPatch, NewFoodRecord},
        ports::FoodRepository,
    },
};

#[derive(Clone, Default)]
pub struct InMemoryFoodRepository {
    records: Arc<Mutex<Vec<FoodRecord>>>,
    latency: Arc<Mutex<Option<Duration>>>,
    unavailable: Arc<AtomicBool>,
    lookup_calls: Arc<AtomicUsize>,
    search_calls: Arc<AtomicUsize>,
    insert_calls: Arc<AtomicUsize>,
}

impl InMemoryFoodRepository {
    pub fn seed(&self, records: Vec<FoodRecord>) {
        lock(&self.records).extend(records);
    }

    /// Makes every call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay applied to every call before it answers.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *lock(&self.latency) = latency;
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) -> Result<(), CoreError> {
        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::ExternalServiceError(
                "food store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl FoodRepository for InMemoryFoodRepository {
    async fn get_by_barcode(&self, barcode: &str) -> Result<Option<FoodRecord>, CoreError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        Ok(lock(&self.records)
            .iter()
            .find(|r| r.barcode.as_deref() == Some(barcode))
            .cloned())
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<FoodRecord>, CoreError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let needle = query.to_lowercase();
        Ok(lock(&self.records)
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: NewFoodRecord) -> Result<FoodRecord, CoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let mut records = lock(&self.records);
        if let Some(barcode) = &record.barcode
            && records.iter().any(|r| r.barcode.as_ref() == Some(barcode))
        {
            return Err(CoreError::Conflict(format!(
                "barcode {} is already registered",
                barcode
            )));
        }

        let created = record.into_record(generate_uuid_v7().to_string(), Utc::now());
        records.push(created.clone());

        Ok(created)
    }

    async fn update(&self, id: &str, patch: FoodRecordPatch) -> Result<FoodRecord, CoreError> {
        self.round_trip().await?;

        let mut records = lock(&self.records);
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::NotFound)?;
        patch.apply_to(record);

        Ok(record.clone())
    }
}
