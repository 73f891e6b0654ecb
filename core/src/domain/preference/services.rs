use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError, preference::ports::PreferenceStore,
};

/// Reads a JSON blob. Absent and unparseable values come back as
/// `Ok(None)`, the latter logged; a failing store is an error so callers
/// never mistake it for an empty value.
pub async fn load_json<P, T>(store: &P, key: &str) -> Result<Option<T>, CoreError>
where
    P: PreferenceStore,
    T: DeserializeOwned,
{
    let Some(raw) = store
        .get(key)
        .await
        .inspect_err(|e| warn!(key, error = %e, "failed to read preference"))?
    else {
        return Ok(None);
    };

    Ok(serde_json::from_str(&raw)
        .inspect_err(|e| warn!(key, error = %e, "discarding unparseable preference"))
        .ok())
}

pub async fn save_json<P, T>(store: &P, key: &str, value: &T) -> Result<(), CoreError>
where
    P: PreferenceStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| {
        CoreError::StorageError(format!("failed to encode {}: {}", key, e))
    })?;

    store
        .set(key, raw)
        .await
        .inspect_err(|e| warn!(key, error = %e, "failed to persist preference"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryPreferenceStore;

    #[tokio::test]
    async fn test_round_trip_and_garbage() {
        let store = InMemoryPreferenceStore::default();

        save_json(&store, "terms", &vec!["kiwi".to_string()]).await.unwrap();
        let terms: Option<Vec<String>> = load_json(&store, "terms").await.unwrap();
        assert_eq!(terms, Some(vec!["kiwi".to_string()]));

        store.set("terms", "{not json".to_string()).await.unwrap();
        let terms: Option<Vec<String>> = load_json(&store, "terms").await.unwrap();
        assert_eq!(terms, None);
    }

    #[tokio::test]
    async fn test_unreadable_store_is_an_error() {
        let store = InMemoryPreferenceStore::default();
        save_json(&store, "terms", &vec!["kiwi".to_string()]).await.unwrap();
        store.fail_reads(true);

        let result: Result<Option<Vec<String>>, CoreError> = load_json(&store, "terms").await;

        assert!(matches!(result, Err(CoreError::StorageError(_))));
    }
}
