//! Identity Models

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Registered account. Accounts are created by registration or seeded as
/// defaults; they are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub is_admin: bool,
}

/// Postal address used for profiles and order shipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Registration payload. The uuid and the admin flag are assigned by the
/// service; registration always produces a non-admin account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

impl UserUpdate {
    pub(crate) fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }

        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }

        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }

        if let Some(address) = self.address {
            user.address = Some(address);
        }
    }
}
