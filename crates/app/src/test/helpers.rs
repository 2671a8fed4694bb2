//! Test data helpers.

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::domain::{
    catalog::models::{DiscountRule, NewDiscount, NewProduct},
    identity::models::Address,
};

pub(crate) fn far_future() -> Timestamp {
    "2099-01-01T00:00:00Z".parse().expect("valid timestamp")
}

pub(crate) fn sample_product(name: &str, price: u64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        original_price: None,
        description: format!("{name} test listing"),
        category: "Rings".to_string(),
        image: "https://example.com/listing.jpeg".to_string(),
        images: None,
        in_stock: true,
        featured: false,
        new_arrival: false,
        discount: None,
        rating: 4.5,
        reviews: 10,
        specifications: FxHashMap::default(),
    }
}

pub(crate) fn percentage_discount(code: &str, value: u16, min_amount: Option<u64>) -> NewDiscount {
    NewDiscount {
        code: code.to_string(),
        rule: DiscountRule::Percentage { value },
        min_amount,
        expires_at: far_future(),
        is_active: true,
        usage_limit: None,
    }
}

pub(crate) fn fixed_discount(code: &str, value: u64, min_amount: Option<u64>) -> NewDiscount {
    NewDiscount {
        code: code.to_string(),
        rule: DiscountRule::Fixed { value },
        min_amount,
        expires_at: far_future(),
        is_active: true,
        usage_limit: None,
    }
}

pub(crate) fn shipping_address() -> Address {
    Address {
        street: "221B Baker Street".to_string(),
        city: "London".to_string(),
        state: "Greater London".to_string(),
        zip_code: "NW1 6XE".to_string(),
        country: "GB".to_string(),
    }
}
