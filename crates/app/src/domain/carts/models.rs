//! Cart and Order Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        catalog::models::{Product, ProductUuid},
        identity::models::{Address, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// One product in a cart: the quantity plus a snapshot of the product as it
/// was when added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub product: Product,
}

impl CartLine {
    /// Line contribution to the cart total: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}

/// Order lifecycle states. Transitions past `Pending` are driven by
/// back-office tooling, not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Immutable snapshot of a cart at the moment of checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartLine>,
    pub total: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub shipping_address: Address,
    pub payment_method: String,
}
