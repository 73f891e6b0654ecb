use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError, preference::ports::PreferenceStore,
};

/// Stores each key as `<key>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    root: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::Validation(format!(
                "invalid preference key: {:?}",
                key
            )));
        }

        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> CoreError {
    CoreError::StorageError(format!("failed to {} {}: {}", action, path.display(), e))
}

impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error("create", &self.root, e))?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| io_error("write", &tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(io_error("replace", &path, e));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, FilePreferenceStore) {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (_dir, store) = store();

        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let (_dir, store) = store();

        store.set("recent_searches", "[\"kiwi\"]".to_string()).await.unwrap();
        assert_eq!(
            store.get("recent_searches").await.unwrap().as_deref(),
            Some("[\"kiwi\"]")
        );
        assert!(store.root().join("recent_searches.json").exists());

        store.set("recent_searches", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("recent_searches").await.unwrap().as_deref(), Some("[]"));

        store.remove("recent_searches").await.unwrap();
        assert_eq!(store.get("recent_searches").await.unwrap(), None);
        store.remove("recent_searches").await.unwrap();
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let (_dir, store) = store();

        store.set("session", "{}".to_string()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, ["session.json"]);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let (_dir, store) = store();

        for key in ["", "../etc/passwd", "a/b", "fav.json"] {
            assert!(matches!(
                store.set(key, "x".to_string()).await,
                Err(CoreError::Validation(_))
            ));
        }
    }
}
