//! Catalog service errors.
//!
//! Updating or deleting an unknown product or discount is a silent no-op
//! rather than an error, so the only failure mode left is storage itself.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("storage error")]
    Storage(#[from] StorageError),
}
