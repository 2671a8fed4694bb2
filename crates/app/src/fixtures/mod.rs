//! Seed data applied when a storage key is first read and found absent.

pub mod discounts;
pub mod products;
pub mod users;
