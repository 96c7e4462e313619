//! Namespaced session store.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::SessionId;
use crate::cache::{CacheClient, CacheClientExt};
use crate::Result;

/// Prefix shared by every session namespace.
pub const SESSION_KEY_PREFIX: &str = "sess:";

/// A client's private view over the cache.
///
/// Every key is stored as `sess:<session-id>:<key>`. The store holds no
/// values of its own; reads and writes go straight to the cache client, and
/// cache faults propagate unchanged.
#[derive(Clone)]
pub struct Session {
    id: SessionId,
    prefix: String,
    cache: Arc<dyn CacheClient>,
}

impl Session {
    /// Bind a session store to `id`.
    pub fn new(cache: Arc<dyn CacheClient>, id: SessionId) -> Self {
        let prefix = format!("{SESSION_KEY_PREFIX}{id}:");
        Self { id, prefix, cache }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The namespace prepended to every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The cache key used for `key`.
    pub fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Read and deserialize the value at `key`. A miss is `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.cache.get_as(&self.key(key))?)
    }

    /// Serialize and store `value` at `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        Ok(self.cache.set_as(&self.key(key), value)?)
    }

    /// Read the value at `key` without knowing its type.
    pub fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.cache.get(&self.key(key))?)
    }

    /// Store an already-tagged value at `key`.
    pub fn set_value(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.cache.set(&self.key(key), value.into())?)
    }

    /// Remove `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(&self.key(key))?)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
