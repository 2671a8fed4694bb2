//! Products Repository

use crate::{
    domain::catalog::models::Product,
    fixtures,
    storage::{Storage, StorageError, decode, encode},
};

const PRODUCTS_KEY: &str = "products";

#[derive(Debug, Clone, Default)]
pub(crate) struct ProductsRepository;

impl ProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the product list, seeding the default catalog on first use.
    pub(crate) fn load_products(
        &self,
        storage: &dyn Storage,
    ) -> Result<Vec<Product>, StorageError> {
        match storage.read(PRODUCTS_KEY)? {
            Some(raw) => decode(PRODUCTS_KEY, &raw),
            None => {
                let products = fixtures::products::default_products();

                self.save_products(storage, &products)?;

                Ok(products)
            }
        }
    }

    pub(crate) fn save_products(
        &self,
        storage: &dyn Storage,
        products: &[Product],
    ) -> Result<(), StorageError> {
        storage.write(PRODUCTS_KEY, &encode(PRODUCTS_KEY, &products)?)
    }
}
