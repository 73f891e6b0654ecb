use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use super::lock;
use crate::domain::{
    common::entities::app_errors::CoreError, preference::ports::PreferenceStore,
};

#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryPreferenceStore {
    /// Makes `get` fail like an unreadable device store.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes `set` and `remove` fail; stored values stay as they are.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("simulated write error".to_string()));
        }
        Ok(())
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("simulated read error".to_string()));
        }
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        self.check_writable()?;
        lock(&self.values).insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.check_writable()?;
        lock(&self.values).remove(key);
        Ok(())
    }
}
