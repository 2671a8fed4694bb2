//! Catalog Repositories

mod discounts;
mod products;

pub(crate) use discounts::DiscountsRepository;
pub(crate) use products::ProductsRepository;
