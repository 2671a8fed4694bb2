//! Vitrine storefront state engine.
//!
//! Three cooperating stores — identity, catalog, and cart/orders — hold all
//! storefront state in memory and mirror it to a local string-keyed JSON
//! store. There is no backend and no network protocol; consumers call the
//! store services directly.

pub mod context;
pub mod domain;
pub mod fixtures;
pub mod storage;

#[cfg(test)]
mod test;

mod uuids;
