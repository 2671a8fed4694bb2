//! Identity service errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum IdentityServiceError {
    #[error("email already registered")]
    AlreadyRegistered,

    #[error("no account for that email")]
    UnknownEmail,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("storage error")]
    Storage(#[from] StorageError),
}
