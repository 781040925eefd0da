//! Durable key/value storage
//!
//! The session, the current user and the language preference survive
//! restarts through this module. Every operation returns an explicit
//! result; callers decide whether a failure matters.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Key holding the serialized current user
pub const USER_KEY: &str = "user";
/// Key holding the language preference
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupted: {0}")]
    Corrupted(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store
pub trait KeyValueStorage: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Remove several keys, stopping at the first failure
    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-memory storage, used when nothing should outlive the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON file storage: `{data_dir}/storage.json`
///
/// The whole map is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join("storage.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupted(e.to_string()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(path = %self.file_path.display(), "Storage saved");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable storage file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.file_path.exists() {
            return Ok(());
        }
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Corrupted(_)) => return self.save(&BTreeMap::new()),
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}
