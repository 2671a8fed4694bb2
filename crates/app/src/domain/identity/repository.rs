//! Users Repository

use crate::{
    domain::identity::models::User,
    fixtures,
    storage::{Storage, StorageError, decode, encode},
};

const USERS_KEY: &str = "users";
const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug, Clone, Default)]
pub(crate) struct UsersRepository;

impl UsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the account registry, seeding the default accounts on first use.
    pub(crate) fn load_users(&self, storage: &dyn Storage) -> Result<Vec<User>, StorageError> {
        match storage.read(USERS_KEY)? {
            Some(raw) => decode(USERS_KEY, &raw),
            None => {
                let users = fixtures::users::default_users();

                self.save_users(storage, &users)?;

                Ok(users)
            }
        }
    }

    pub(crate) fn save_users(
        &self,
        storage: &dyn Storage,
        users: &[User],
    ) -> Result<(), StorageError> {
        storage.write(USERS_KEY, &encode(USERS_KEY, &users)?)
    }

    pub(crate) fn load_current_user(
        &self,
        storage: &dyn Storage,
    ) -> Result<Option<User>, StorageError> {
        storage
            .read(CURRENT_USER_KEY)?
            .map(|raw| decode(CURRENT_USER_KEY, &raw))
            .transpose()
    }

    pub(crate) fn save_current_user(
        &self,
        storage: &dyn Storage,
        user: &User,
    ) -> Result<(), StorageError> {
        storage.write(CURRENT_USER_KEY, &encode(CURRENT_USER_KEY, user)?)
    }

    pub(crate) fn clear_current_user(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage.remove(CURRENT_USER_KEY)
    }
}
