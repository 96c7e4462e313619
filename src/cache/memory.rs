//! In-memory cache client.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::{CacheClient, CacheError};

/// Thread-safe in-process cache.
///
/// Entries never expire. Each operation takes the lock once, so a
/// get-then-set sequence from the caller is not atomic.
#[derive(Debug, Default)]
pub struct MemoryCacheClient {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryCacheClient {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the cache.
    pub fn count(&self) -> Result<usize, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(entries.len())
    }
}

impl CacheClient for MemoryCacheClient {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }
}
