//! Cache client abstraction.
//!
//! The session layer never talks to a storage engine directly. It goes
//! through [`CacheClient`], a minimal key-value contract whose values are
//! tagged [`serde_json::Value`]s. Typed access is layered on top by
//! [`CacheClientExt`].
//!
//! [`MemoryCacheClient`] is an in-process implementation suitable for tests
//! and single-node deployments.

mod memory;

pub use memory::MemoryCacheClient;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a cache client.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A value could not be converted to or from its stored form.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// The backend reported a failure (connectivity, timeout, ...).
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Key-value store consumed by the session layer.
///
/// Implementations own eviction, expiry and synchronization. A miss is
/// `Ok(None)`, never an error.
pub trait CacheClient: Send + Sync {
    /// Read the value stored at `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Remove `key`. Returns whether an entry existed.
    fn remove(&self, key: &str) -> Result<bool, CacheError>;
}

/// Typed accessors for any [`CacheClient`].
pub trait CacheClientExt: CacheClient {
    /// Read and deserialize the value at `key`.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store `value` at `key`.
    fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<C: CacheClient + ?Sized> CacheClientExt for C {}
