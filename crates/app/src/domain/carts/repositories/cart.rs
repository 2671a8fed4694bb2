//! Cart Repository
//!
//! Each identity has its own persisted cart, stored under a key derived
//! from the owning user's uuid.

use crate::{
    domain::{carts::models::CartLine, identity::models::UserUuid},
    storage::{Storage, StorageError, decode, encode},
};

const CART_KEY_PREFIX: &str = "cart_";

fn cart_key(user: UserUuid) -> String {
    format!("{CART_KEY_PREFIX}{user}")
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CartRepository;

impl CartRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the persisted cart for `user`; absent carts are empty.
    pub(crate) fn load_lines(
        &self,
        storage: &dyn Storage,
        user: UserUuid,
    ) -> Result<Vec<CartLine>, StorageError> {
        let key = cart_key(user);

        match storage.read(&key)? {
            Some(raw) => decode(&key, &raw),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn save_lines(
        &self,
        storage: &dyn Storage,
        user: UserUuid,
        lines: &[CartLine],
    ) -> Result<(), StorageError> {
        let key = cart_key(user);

        storage.write(&key, &encode(&key, &lines)?)
    }
}
