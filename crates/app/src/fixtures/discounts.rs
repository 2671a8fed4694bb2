//! Default Discount Fixtures

use jiff::Timestamp;

use crate::domain::catalog::models::{Discount, DiscountRule, DiscountUuid};

/// `2026-12-31T00:00:00Z`
const WELCOME10_EXPIRY: Timestamp = Timestamp::constant(1_798_675_200, 0);

/// `2026-06-30T00:00:00Z`
const SAVE50_EXPIRY: Timestamp = Timestamp::constant(1_782_777_600, 0);

/// Discount codes seeded into an empty registry.
#[must_use]
pub fn default_discounts() -> Vec<Discount> {
    vec![
        Discount {
            uuid: DiscountUuid::new(),
            code: "WELCOME10".to_string(),
            rule: DiscountRule::Percentage { value: 10 },
            min_amount: Some(500_00),
            expires_at: WELCOME10_EXPIRY,
            is_active: true,
            usage_limit: Some(100),
            used_count: 23,
        },
        Discount {
            uuid: DiscountUuid::new(),
            code: "SAVE50".to_string(),
            rule: DiscountRule::Fixed { value: 50_00 },
            min_amount: Some(300_00),
            expires_at: SAVE50_EXPIRY,
            is_active: true,
            usage_limit: Some(50),
            used_count: 12,
        },
    ]
}
