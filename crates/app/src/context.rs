//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, LocalCartsService},
        catalog::{CatalogService, CatalogServiceError, LocalCatalogService},
        identity::{IdentityService, IdentityServiceError, LocalIdentityService},
    },
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open storage")]
    Storage(#[from] StorageError),

    #[error("failed to load identities")]
    Identity(#[from] IdentityServiceError),

    #[error("failed to load catalog")]
    Catalog(#[from] CatalogServiceError),

    #[error("failed to load orders")]
    Carts(#[from] CartsServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub storage: Arc<dyn Storage>,
    pub identity: Arc<dyn IdentityService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context over a data directory on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or a persisted
    /// document cannot be read.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Result<Self, AppInitError> {
        Self::with_storage(Arc::new(FileStorage::new(dir.as_ref())?))
    }

    /// Build application context over transient in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error when seeding the default state fails.
    pub fn in_memory() -> Result<Self, AppInitError> {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Wire the three stores over a shared storage backend. The cart store
    /// reads the signed-in identity through the identity store.
    ///
    /// # Errors
    ///
    /// Returns an error when a persisted document cannot be read.
    pub fn with_storage(storage: Arc<dyn Storage>) -> Result<Self, AppInitError> {
        let identity: Arc<dyn IdentityService> =
            Arc::new(LocalIdentityService::new(Arc::clone(&storage))?);

        let catalog = Arc::new(LocalCatalogService::new(Arc::clone(&storage))?);

        let carts = Arc::new(LocalCartsService::new(
            Arc::clone(&storage),
            Arc::clone(&identity),
        )?);

        Ok(Self {
            storage,
            identity,
            catalog,
            carts,
        })
    }
}
