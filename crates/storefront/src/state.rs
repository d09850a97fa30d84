//! Application and session state.
//!
//! [`AppState`] holds the shared, immutable services (configuration, catalog
//! client, key-value store). [`Session`] holds the mutable per-session state
//! (cart, preferences) loaded from the store at startup. Together they
//! replace the original storefront's ambient globals with explicit values
//! passed to each operation.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::prefs::{self, Preferences};
use crate::storage::{FileStore, KvStore};

/// Shared services for the storefront.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    storage: Arc<dyn KvStore>,
}

impl AppState {
    /// Create application state backed by the file store in
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or the catalog client cannot
    /// be set up.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let storage: Arc<dyn KvStore> = Arc::new(FileStore::open(&config.data_dir)?);
        Self::with_storage(config, storage)
    }

    /// Create application state over an arbitrary key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be set up.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn KvStore>,
    ) -> Result<Self, AppError> {
        let catalog = CatalogClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KvStore> {
        &self.inner.storage
    }
}

/// Mutable per-session state.
///
/// Created from persisted values at session start; every mutation goes back
/// through the store, so a later session resumes where this one left off.
pub struct Session {
    /// The session's cart.
    pub cart: CartStore,
    /// UI preferences.
    pub prefs: Preferences,
}

impl Session {
    /// Load session state from the application's store.
    #[must_use]
    pub fn load(state: &AppState) -> Self {
        Self {
            cart: CartStore::load(Arc::clone(state.storage())),
            prefs: prefs::load(state.storage().as_ref()),
        }
    }

    /// Flip the dark-mode flag and persist the result.
    ///
    /// Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be persisted.
    pub fn toggle_dark_mode(&mut self, state: &AppState) -> Result<bool, AppError> {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        prefs::save(state.storage().as_ref(), &self.prefs)?;
        Ok(self.prefs.dark_mode)
    }
}
