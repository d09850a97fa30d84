//! Opaque key-value persistence for session state.
//!
//! The engine treats persistence as a plain key-value store of JSON values,
//! mirroring the browser storage the original storefront ran against. Two
//! implementations exist: [`FileStore`] for real sessions and [`MemoryStore`]
//! for tests and ephemeral use.
//!
//! Absence of a key is a valid state meaning "empty/default", and a value
//! that fails to parse is treated the same way: [`load_or_default`] logs a
//! warning and substitutes the type's default rather than surfacing an error.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Logical keys used by the engine.
pub mod keys {
    /// Key for the serialized cart (written after every cart mutation).
    pub const CART: &str = "cart";

    /// Key for the serialized user profile (written at signup).
    pub const PROFILE: &str = "userinfo";

    /// Key for UI preferences (dark mode).
    pub const PREFS: &str = "prefs";
}

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        /// The logical key being accessed.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("Serialization error for key {key}: {source}")]
    Serialize {
        /// The logical key being written.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// An opaque key-value store holding JSON-compatible values.
///
/// Implementations must make each `put` atomic from the reader's point of
/// view: a concurrent or subsequent `get` sees either the old or the new
/// value, never a partial write.
pub trait KvStore: Send + Sync {
    /// Read the raw bytes stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load a JSON value from the store, falling back to `T::default()`.
///
/// A missing key is the normal "fresh session" case and falls back silently.
/// An unreadable store or an unparseable value falls back too, with a
/// warning - persisted-state corruption must never break the session.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unparseable stored value");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            T::default()
        }
    }
}

/// Serialize a value as JSON and write it to the store.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the underlying write fails.
pub fn store_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        count: u32,
    }

    #[test]
    fn test_load_missing_key_yields_default() {
        let store = MemoryStore::new();
        let value: Sample = load_or_default(&store, "absent");
        assert_eq!(value, Sample::default());
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let store = MemoryStore::new();
        store_json(&store, "sample", &Sample { count: 3 }).unwrap();
        let value: Sample = load_or_default(&store, "sample");
        assert_eq!(value, Sample { count: 3 });
    }

    #[test]
    fn test_corrupt_value_yields_default() {
        let store = MemoryStore::new();
        store.put("sample", b"{not json").unwrap();
        let value: Sample = load_or_default(&store, "sample");
        assert_eq!(value, Sample::default());
    }
}
