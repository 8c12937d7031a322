pub mod local;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raw key-value string backend.
/// Implementations: MemoryStore (in-process, optional quota), FileStore (directory on disk).
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw string under `key`, `Ok(None)` when the key is missing.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt data under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON layer over a [`KeyValueStore`].
///
/// Every failure is logged here and never panics. `write`, `remove` and
/// `clear` still hand the error back so a caller can tell a lost write from a
/// successful one, and `try_read` separates a missing key from corrupt data.
/// `read` folds both into `None`.
pub struct PersistedStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PersistedStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let result = serde_json::to_string(value)
            .map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })
            .and_then(|serialized| self.backend.set(key, &serialized));
        if let Err(e) = &result {
            log::error!("[storage.write] Failed to write {}: {}", key, e);
        }
        result
    }

    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let raw = match self.backend.get(key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_read(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[storage.read] Failed to read {}: {}", key, e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let result = self.backend.remove(key);
        if let Err(e) = &result {
            log::error!("[storage.remove] Failed to remove {}: {}", key, e);
        }
        result
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let result = self.backend.clear();
        if let Err(e) = &result {
            log::error!("[storage.clear] Failed to clear store: {}", e);
        }
        result
    }
}
