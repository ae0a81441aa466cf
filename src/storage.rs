//! Durable key-value storage backing the session.
//!
//! Two backends:
//! - `MemoryStore`: process-local, lost on exit (tests, embedding)
//! - `FileStore`: a single JSON object file, re-read on every access

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// String-to-string store with browser-storage semantics.
///
/// Reads never fail: anything that cannot be read is reported as absent.
/// Writes surface I/O errors to the caller.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|v| v.value().clone())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// JSON-file store. Concurrent writers are not coordinated: last write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read session store {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        if raw.trim().is_empty() {
            return BTreeMap::new();
        }

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    "Session store {} is malformed, treating as empty: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.read_all();
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.read_all();
        if items.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_all(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k"), None);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove_item("missing").is_ok());
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("session.json");
        let store = FileStore::new(&path);
        store.set_item("k", "v").unwrap();
        assert!(path.exists());
        assert_eq!(store.get_item("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_is_visible_to_second_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let a = FileStore::new(&path);
        let b = FileStore::new(&path);

        a.set_item("k", "first").unwrap();
        assert_eq!(b.get_item("k").as_deref(), Some("first"));

        // Last write wins.
        b.set_item("k", "second").unwrap();
        assert_eq!(a.get_item("k").as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_malformed_file_reads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"k\": \"trunc").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get_item("k"), None);

        store.set_item("other", "v").unwrap();
        assert_eq!(store.get_item("other").as_deref(), Some("v"));
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_file_store_remove_on_missing_file_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);
        store.remove_item("k").unwrap();
        assert!(!path.exists());
    }
}
