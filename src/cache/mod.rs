//! Persisted cache for the daily dashboard
//!
//! A `KeyValueStore` holds string values under string keys and survives process
//! restarts. `DailyCache` layers the two-key dashboard entry (content JSON plus
//! the day it was fetched) on top of any store.

mod daily;
mod store;

pub use daily::{CachedDay, DailyCache, CONTENT_KEY, DAY_KEY};
pub use store::{CacheError, FileStore, KeyValueStore, MemoryStore};
