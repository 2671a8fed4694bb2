//! Orders Repository

use crate::{
    domain::carts::models::Order,
    storage::{Storage, StorageError, decode, encode},
};

const ORDERS_KEY: &str = "orders";

#[derive(Debug, Clone, Default)]
pub(crate) struct OrdersRepository;

impl OrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the global order list; absent lists are empty.
    pub(crate) fn load_orders(&self, storage: &dyn Storage) -> Result<Vec<Order>, StorageError> {
        match storage.read(ORDERS_KEY)? {
            Some(raw) => decode(ORDERS_KEY, &raw),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn save_orders(
        &self,
        storage: &dyn Storage,
        orders: &[Order],
    ) -> Result<(), StorageError> {
        storage.write(ORDERS_KEY, &encode(ORDERS_KEY, &orders)?)
    }
}
