//! Carts service errors.

use thiserror::Error;

use crate::{domain::identity::errors::IdentityServiceError, storage::StorageError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("a user must be signed in to place an order")]
    NotSignedIn,

    #[error("identity error")]
    Identity(#[from] IdentityServiceError),

    #[error("storage error")]
    Storage(#[from] StorageError),
}
