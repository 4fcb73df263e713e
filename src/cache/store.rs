//! Key/value stores backing the dashboard cache
//!
//! `FileStore` keeps one file per key in an XDG-compliant cache directory
//! (`~/.cache/ayumi/` on Linux). `MemoryStore` keeps values in memory and is
//! used in tests and when no home directory is available.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur when writing to a store
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem write failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized for storage
    #[error("Failed to serialize cache value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key/value storage
///
/// `get` never fails: a missing or unreadable value is reported as `None`.
/// A successful `set` is visible to the next `get` in the same process.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Stores each key as a file in a cache directory
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl FileStore {
    /// Creates a store in the XDG cache directory for `ayumi`
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "ayumi")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a store rooted at a custom directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the file holding `key`
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.cache", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.cache_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;
        fs::write(self.cache_path(key), value)?;
        Ok(())
    }
}

/// In-memory store that lasts for the life of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
