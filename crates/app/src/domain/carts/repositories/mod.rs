//! Cart Repositories

mod cart;
mod orders;

pub(crate) use cart::CartRepository;
pub(crate) use orders::OrdersRepository;
