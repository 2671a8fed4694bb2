//! Identity

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::IdentityServiceError;
pub use service::*;
