//! Persisted UI preferences.
//!
//! The original storefront kept the dark-mode flag in ambient global state;
//! here it is an explicit value loaded into the session and passed to
//! whatever shell renders it.

use serde::{Deserialize, Serialize};

use crate::storage::{self, KvStore, StorageError, keys};

/// UI preferences for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        // Dark theme is the out-of-the-box experience
        Self { dark_mode: true }
    }
}

/// Load preferences, falling back to defaults on absence or parse failure.
#[must_use]
pub fn load(store: &dyn KvStore) -> Preferences {
    storage::load_or_default(store, keys::PREFS)
}

/// Persist preferences.
///
/// # Errors
///
/// Returns `StorageError` if the preferences cannot be written.
pub fn save(store: &dyn KvStore, prefs: &Preferences) -> Result<(), StorageError> {
    storage::store_json(store, keys::PREFS, prefs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert!(Preferences::default().dark_mode);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let store = MemoryStore::new();
        save(&store, &Preferences { dark_mode: false }).unwrap();
        assert!(!load(&store).dark_mode);
    }

    #[test]
    fn test_corrupt_prefs_fall_back_to_default() {
        let store = MemoryStore::new();
        store.put(keys::PREFS, b"3.14not json").unwrap();
        assert_eq!(load(&store), Preferences::default());
    }
}
