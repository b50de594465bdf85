//! # Application State
//!
//! Explicit, thread-safe handles built once at application start and passed
//! to request handlers: the router and the shared record store.
//!
//! There is no process-wide singleton. Clones of a `SharedStore` refer to
//! the same store; independent `open` calls give independent stores.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver::ControllerResolver;
use crate::router::Router;
use crate::store::JsonFileStore;
use std::sync::{Arc, RwLock};

/// Cloneable handle to one `JsonFileStore`
///
/// Reads share a read lock. Each mutation holds the write lock across the
/// in-memory change and the rewrite of the backing file, so concurrent
/// writers are serialized instead of losing updates.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<JsonFileStore>>,
}

impl SharedStore {
    /// Wrap an opened store
    #[must_use]
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Read-only access to the store
    ///
    /// # Errors
    ///
    /// Returns `Error::StateLockPoisoned` if a writer panicked.
    pub fn read<F, R>(&self, action: F) -> Result<R>
    where
        F: FnOnce(&JsonFileStore) -> R,
    {
        let store = self.inner.read().map_err(|_| Error::StateLockPoisoned)?;
        Ok(action(&store))
    }

    /// Exclusive access to the store for a mutation
    ///
    /// # Errors
    ///
    /// Returns `Error::StateLockPoisoned` if a writer panicked, or whatever
    /// error `action` returns.
    pub fn write<F, R>(&self, action: F) -> Result<R>
    where
        F: FnOnce(&mut JsonFileStore) -> Result<R>,
    {
        let mut store = self.inner.write().map_err(|_| Error::StateLockPoisoned)?;
        action(&mut store)
    }

    /// Whether two handles refer to the same store
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("SharedStore");
        match self.inner.read() {
            Ok(store) => debug.field("path", &store.path()),
            Err(_) => debug.field("path", &"<poisoned>"),
        };
        debug.finish()
    }
}

/// Router and record store for one application
#[derive(Debug, Clone)]
pub struct AppState {
    /// Positional request router
    pub router: Router,
    /// Shared record store
    pub store: SharedStore,
}

impl AppState {
    /// Build the router and open the store described by `config`
    ///
    /// # Errors
    ///
    /// Returns the router's or the store's configuration error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let router = Router::new(config.router.clone(), &config.route_file)?;
        let store = JsonFileStore::with_config(&config.store)?;
        Ok(Self {
            router,
            store: SharedStore::new(store),
        })
    }

    /// Use `resolver` to answer `Route::controller_exists`
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ControllerResolver + 'static) -> Self {
        self.router = self.router.with_resolver(resolver);
        self
    }
}
