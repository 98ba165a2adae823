//! Durable key/value storage for the assistant's credential.
//!
//! `CredentialStore` is the seam; `FileCredentialStore` keeps a single JSON
//! object on disk and `MemoryCredentialStore` backs tests.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt credential file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites any prior value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed store
// ────────────────────────────────────────────────────────────────────────────

/// A JSON object file, e.g. `{ "gemini_api_key": "..." }`.
///
/// A missing file reads as empty. Writes go to a temp file in the same
/// directory and are renamed over the target.
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!("Credential store written to {}", self.path.display());
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.get("gemini_api_key").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileCredentialStore::new(&path);
        store.set("gemini_api_key", "abc").unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get("gemini_api_key").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_set_overwrites_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.set("other", "keep-me").unwrap();
        store.set("gemini_api_key", "first").unwrap();
        store.set("gemini_api_key", "second").unwrap();

        assert_eq!(store.get("gemini_api_key").unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("keep-me"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.get("gemini_api_key"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
