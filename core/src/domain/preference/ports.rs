use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Persistent key-value storage on the device.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}
