//! Durable key-value storage for client state.
//!
//! One file per key under the data directory, string values. This is the
//! persistence layer behind the session store; it survives restarts and is
//! deleted entry-by-entry on logout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

/// Application name used for the data directory path
const APP_NAME: &str = "quizread";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open the store rooted at `dir`, creating it if needed
    pub fn open(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Default storage location under the platform data directory
    pub fn default_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a value. Missing or unreadable keys read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Failed to read storage entry");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.key_path(key), value)
            .with_context(|| format!("Failed to write storage entry {}", key))
    }

    /// Serialize `value` to JSON and store it under `key`
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize storage entry {}", key))?;
        self.set(key, &contents)
    }

    /// Delete a key. Infallible: a missing entry is already deleted, and an
    /// undeletable one is only logged (callers like logout never fail).
    pub fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if !path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&path) {
            warn!(key, error = %e, "Failed to delete storage entry");
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::open(dir.path().to_path_buf()).expect("open storage");
        (dir, storage)
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, storage) = open_temp();
        assert!(storage.get("authToken").is_none());

        storage.set("authToken", "tok-123").expect("set");
        assert_eq!(storage.get("authToken").as_deref(), Some("tok-123"));
        assert!(storage.contains("authToken"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = open_temp();
        storage.set("currentUser", "{}").expect("set");

        storage.remove("currentUser");
        assert!(storage.get("currentUser").is_none());

        // Removing again must be a no-op, not an error
        storage.remove("currentUser");
    }

    #[test]
    fn test_set_json() {
        let (_dir, storage) = open_temp();
        storage
            .set_json("currentUser", &serde_json::json!({ "userId": "u1" }))
            .expect("set_json");
        assert_eq!(
            storage.get("currentUser").as_deref(),
            Some(r#"{"userId":"u1"}"#)
        );
    }
}
