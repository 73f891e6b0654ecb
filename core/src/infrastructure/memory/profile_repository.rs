use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use uuid::Uuid;

use super::lock;
use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::{entities::Profile, ports::ProfileRepository},
};

#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<Uuid, Profile>>>,
    upsert_calls: Arc<AtomicUsize>,
}

impl InMemoryProfileRepository {
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn get_by_user_id(
        &self,
        user_id: Uuid,
        _access_token: &str,
    ) -> Result<Option<Profile>, CoreError> {
        Ok(lock(&self.profiles).get(&user_id).cloned())
    }

    async fn upsert(&self, profile: Profile, _access_token: &str) -> Result<Profile, CoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.profiles).insert(profile.id, profile.clone());

        Ok(profile)
    }
}
