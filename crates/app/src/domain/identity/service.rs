//! Identity service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockall::automock;
use tracing::info;

use crate::{
    domain::identity::{
        errors::IdentityServiceError,
        models::{NewUser, User, UserUpdate, UserUuid},
        repository::UsersRepository,
    },
    storage::Storage,
};

#[derive(Debug)]
pub struct LocalIdentityService {
    storage: Arc<dyn Storage>,
    repository: UsersRepository,
    state: Mutex<IdentityState>,
}

#[derive(Debug, Default)]
struct IdentityState {
    current: Option<User>,
    users: Vec<User>,
}

impl LocalIdentityService {
    /// Load the registry and any persisted session from storage, seeding the
    /// default accounts when the registry is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted registry cannot be read.
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self, IdentityServiceError> {
        let repository = UsersRepository::new();
        let users = repository.load_users(storage.as_ref())?;
        let current = repository.load_current_user(storage.as_ref())?;

        Ok(Self {
            storage,
            repository,
            state: Mutex::new(IdentityState { current, users }),
        })
    }

    fn state(&self) -> MutexGuard<'_, IdentityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityService for LocalIdentityService {
    fn current_user(&self) -> Result<Option<User>, IdentityServiceError> {
        Ok(self.state().current.clone())
    }

    fn login(&self, email: &str, _password: &str) -> Result<User, IdentityServiceError> {
        // Passwords are accepted but never verified; a matching email is
        // enough to sign in.
        let mut state = self.state();

        let Some(user) = state.users.iter().find(|u| u.email == email).cloned() else {
            return Err(IdentityServiceError::UnknownEmail);
        };

        self.repository
            .save_current_user(self.storage.as_ref(), &user)?;

        state.current = Some(user.clone());

        info!(user_uuid = %user.uuid, "signed in");

        Ok(user)
    }

    fn register(&self, profile: NewUser) -> Result<User, IdentityServiceError> {
        let mut state = self.state();

        if state.users.iter().any(|u| u.email == profile.email) {
            return Err(IdentityServiceError::AlreadyRegistered);
        }

        let user = User {
            uuid: UserUuid::new(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            address: profile.address,
            is_admin: false,
        };

        state.users.push(user.clone());

        self.repository
            .save_users(self.storage.as_ref(), &state.users)?;
        self.repository
            .save_current_user(self.storage.as_ref(), &user)?;

        state.current = Some(user.clone());

        info!(user_uuid = %user.uuid, "registered account");

        Ok(user)
    }

    fn logout(&self) -> Result<(), IdentityServiceError> {
        let mut state = self.state();

        self.repository.clear_current_user(self.storage.as_ref())?;

        state.current = None;

        Ok(())
    }

    fn update_profile(&self, update: UserUpdate) -> Result<User, IdentityServiceError> {
        let mut state = self.state();

        let Some(mut user) = state.current.clone() else {
            return Err(IdentityServiceError::NotSignedIn);
        };

        update.apply(&mut user);

        self.repository
            .save_current_user(self.storage.as_ref(), &user)?;

        if let Some(index) = state.users.iter().position(|u| u.uuid == user.uuid) {
            state.users[index] = user.clone();

            self.repository
                .save_users(self.storage.as_ref(), &state.users)?;
        }

        state.current = Some(user.clone());

        Ok(user)
    }
}

#[automock]
pub trait IdentityService: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Result<Option<User>, IdentityServiceError>;

    /// Sign in by email. The password is accepted but not verified.
    fn login(&self, email: &str, password: &str) -> Result<User, IdentityServiceError>;

    /// Register a new non-admin account and sign it in.
    fn register(&self, profile: NewUser) -> Result<User, IdentityServiceError>;

    /// Clear the signed-in user.
    fn logout(&self) -> Result<(), IdentityServiceError>;

    /// Merge the partial update into the signed-in user's profile and the
    /// matching registry entry.
    fn update_profile(&self, update: UserUpdate) -> Result<User, IdentityServiceError>;
}
