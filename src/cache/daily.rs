//! Two-key cache entry for the daily dashboard

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{CacheError, KeyValueStore};
use crate::content::Content;

/// Key holding the serialized dashboard JSON
pub const CONTENT_KEY: &str = "ayumi_home_dashboard_v2";

/// Key holding the day string the dashboard was fetched on
pub const DAY_KEY: &str = "ayumi_last_fetch_date";

/// A cached dashboard together with the day it was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDay {
    pub content: Content,
    pub day: String,
}

/// Reads and writes the dashboard entry as a pair
///
/// Both keys are read and written under one lock, so no reader in this
/// process can observe a content/day pair from two different writes.
/// A crash between the two file writes can still leave them mismatched.
pub struct DailyCache {
    store: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl DailyCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Reads the cached entry
    ///
    /// Returns `None` if either key is absent or the stored content is not a
    /// valid dashboard; corruption is treated exactly like a miss.
    pub fn read(&self) -> Option<CachedDay> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let raw = self.store.get(CONTENT_KEY)?;
        let day = self.store.get(DAY_KEY)?;

        match serde_json::from_str::<Content>(&raw) {
            Ok(content) => Some(CachedDay { content, day }),
            Err(e) => {
                debug!(error = %e, "cached dashboard is unreadable, treating as miss");
                None
            }
        }
    }

    /// Stores `content` as the entry for `day`
    ///
    /// The content key is written first, then the day key.
    pub fn write(&self, content: &Content, day: &str) -> Result<(), CacheError> {
        let json = serde_json::to_string(content)?;

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.store.set(CONTENT_KEY, &json)?;
        self.store.set(DAY_KEY, day)?;
        Ok(())
    }
}
