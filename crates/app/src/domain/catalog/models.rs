//! Catalog Models

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Discount UUID
pub type DiscountUuid = TypedUuid<Discount>;

/// Sellable product with pricing and merchandising flags.
///
/// Monetary fields are minor units. `original_price` and the display
/// `discount` percentage are merchandising data; checkout totals always use
/// `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub in_stock: bool,
    pub featured: bool,
    pub new_arrival: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u16>,
    pub rating: f32,
    pub reviews: u32,
    pub specifications: FxHashMap<String, String>,
}

/// Product creation payload; the uuid is assigned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub description: String,
    pub category: String,
    pub image: String,
    pub images: Option<Vec<String>>,
    pub in_stock: bool,
    pub featured: bool,
    pub new_arrival: bool,
    pub discount: Option<u16>,
    pub rating: f32,
    pub reviews: u32,
    pub specifications: FxHashMap<String, String>,
}

/// Partial product update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub original_price: Option<u64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
    pub discount: Option<u16>,
    pub rating: Option<f32>,
    pub reviews: Option<u32>,
    pub specifications: Option<FxHashMap<String, String>>,
}

impl ProductUpdate {
    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }

        if let Some(price) = self.price {
            product.price = price;
        }

        if let Some(original_price) = self.original_price {
            product.original_price = Some(original_price);
        }

        if let Some(description) = self.description {
            product.description = description;
        }

        if let Some(category) = self.category {
            product.category = category;
        }

        if let Some(image) = self.image {
            product.image = image;
        }

        if let Some(images) = self.images {
            product.images = Some(images);
        }

        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }

        if let Some(featured) = self.featured {
            product.featured = featured;
        }

        if let Some(new_arrival) = self.new_arrival {
            product.new_arrival = new_arrival;
        }

        if let Some(discount) = self.discount {
            product.discount = Some(discount);
        }

        if let Some(rating) = self.rating {
            product.rating = rating;
        }

        if let Some(reviews) = self.reviews {
            product.reviews = reviews;
        }

        if let Some(specifications) = self.specifications {
            product.specifications = specifications;
        }
    }
}

/// How a discount reduces an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountRule {
    /// Remove `value` percent of the amount.
    Percentage { value: u16 },

    /// Remove a flat `value`, never going below zero.
    Fixed { value: u64 },
}

impl DiscountRule {
    /// Apply this rule to `amount`, clamping at zero.
    #[must_use]
    pub fn reduce(&self, amount: u64) -> u64 {
        match *self {
            Self::Percentage { value } => {
                amount.saturating_sub(amount.saturating_mul(u64::from(value)) / 100)
            }
            Self::Fixed { value } => amount.saturating_sub(value),
        }
    }

    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Percentage { .. } => "percentage",
            Self::Fixed { .. } => "fixed",
        }
    }
}

/// Promotional code with eligibility constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub uuid: DiscountUuid,
    pub code: String,
    #[serde(flatten)]
    pub rule: DiscountRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<u64>,
    pub expires_at: Timestamp,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    pub used_count: u32,
}

impl Discount {
    /// Whether this discount can reduce `amount` at instant `now`: active,
    /// unexpired, under its usage limit, and over its minimum amount.
    #[must_use]
    pub fn eligible(&self, amount: u64, now: Timestamp) -> bool {
        self.is_active
            && now < self.expires_at
            && self.usage_limit.is_none_or(|limit| self.used_count < limit)
            && self.min_amount.is_none_or(|min| amount >= min)
    }
}

/// Discount creation payload; the uuid is assigned by the service and the
/// usage count starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscount {
    pub code: String,
    pub rule: DiscountRule,
    pub min_amount: Option<u64>,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub usage_limit: Option<u32>,
}

/// Partial discount update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountUpdate {
    pub code: Option<String>,
    pub rule: Option<DiscountRule>,
    pub min_amount: Option<u64>,
    pub expires_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub usage_limit: Option<u32>,
}

impl DiscountUpdate {
    pub(crate) fn apply(self, discount: &mut Discount) {
        if let Some(code) = self.code {
            discount.code = code;
        }

        if let Some(rule) = self.rule {
            discount.rule = rule;
        }

        if let Some(min_amount) = self.min_amount {
            discount.min_amount = Some(min_amount);
        }

        if let Some(expires_at) = self.expires_at {
            discount.expires_at = expires_at;
        }

        if let Some(is_active) = self.is_active {
            discount.is_active = is_active;
        }

        if let Some(usage_limit) = self.usage_limit {
            discount.usage_limit = Some(usage_limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> Timestamp {
        raw.parse().expect("valid timestamp")
    }

    fn discount(rule: DiscountRule) -> Discount {
        Discount {
            uuid: DiscountUuid::new(),
            code: "TEST".to_string(),
            rule,
            min_amount: None,
            expires_at: at("2099-01-01T00:00:00Z"),
            is_active: true,
            usage_limit: None,
            used_count: 0,
        }
    }

    #[test]
    fn percentage_rule_removes_a_share_of_the_amount() {
        let rule = DiscountRule::Percentage { value: 10 };

        assert_eq!(rule.reduce(600), 540);
    }

    #[test]
    fn fixed_rule_clamps_at_zero() {
        let rule = DiscountRule::Fixed { value: 80 };

        assert_eq!(rule.reduce(50), 0);
        assert_eq!(rule.reduce(100), 20);
    }

    #[test]
    fn expired_discount_is_not_eligible() {
        let mut d = discount(DiscountRule::Percentage { value: 10 });
        d.expires_at = at("2020-01-01T00:00:00Z");

        assert!(!d.eligible(1000, at("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn inactive_discount_is_not_eligible() {
        let mut d = discount(DiscountRule::Percentage { value: 10 });
        d.is_active = false;

        assert!(!d.eligible(1000, at("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn exhausted_usage_limit_is_not_eligible() {
        let mut d = discount(DiscountRule::Percentage { value: 10 });
        d.usage_limit = Some(5);
        d.used_count = 5;

        assert!(!d.eligible(1000, at("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn minimum_amount_gates_eligibility() {
        let mut d = discount(DiscountRule::Percentage { value: 10 });
        d.min_amount = Some(500);

        let now = at("2025-01-01T00:00:00Z");

        assert!(!d.eligible(400, now));
        assert!(d.eligible(500, now));
    }

    #[test]
    fn discount_document_carries_the_rule_tag() {
        let d = discount(DiscountRule::Fixed { value: 50 });

        let raw = serde_json::to_string(&d).expect("discount should serialize");

        assert!(raw.contains(r#""type":"fixed""#), "missing rule tag: {raw}");

        let back: Discount = serde_json::from_str(&raw).expect("discount should deserialize");
        assert_eq!(back, d);
    }
}
