//! Default Account Fixtures

use crate::domain::identity::models::{User, UserUuid};

/// Accounts seeded into an empty registry: one admin and one customer.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User {
            uuid: UserUuid::new(),
            email: "admin@jewelry.com".to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            phone: None,
            address: None,
            is_admin: true,
        },
        User {
            uuid: UserUuid::new(),
            email: "customer@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            is_admin: false,
        },
    ]
}
