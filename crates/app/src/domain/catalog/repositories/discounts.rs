//! Discounts Repository

use crate::{
    domain::catalog::models::Discount,
    fixtures,
    storage::{Storage, StorageError, decode, encode},
};

const DISCOUNTS_KEY: &str = "discounts";

#[derive(Debug, Clone, Default)]
pub(crate) struct DiscountsRepository;

impl DiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the discount list, seeding the default codes on first use.
    pub(crate) fn load_discounts(
        &self,
        storage: &dyn Storage,
    ) -> Result<Vec<Discount>, StorageError> {
        match storage.read(DISCOUNTS_KEY)? {
            Some(raw) => decode(DISCOUNTS_KEY, &raw),
            None => {
                let discounts = fixtures::discounts::default_discounts();

                self.save_discounts(storage, &discounts)?;

                Ok(discounts)
            }
        }
    }

    pub(crate) fn save_discounts(
        &self,
        storage: &dyn Storage,
        discounts: &[Discount],
    ) -> Result<(), StorageError> {
        storage.write(DISCOUNTS_KEY, &encode(DISCOUNTS_KEY, &discounts)?)
    }
}
