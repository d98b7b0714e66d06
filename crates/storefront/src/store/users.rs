//! User account repository.

use tidepool_core::{Password, Username};

use super::{KeyValueStore, Records, RepositoryError};
use crate::models::{Accounts, keys};

/// Repository for the `users` record.
pub struct UserRepository<'a, S: ?Sized> {
    records: Records<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
        }
    }

    /// Every account. A missing or corrupt record reads as no accounts.
    #[must_use]
    pub fn all(&self) -> Accounts {
        self.records.read_or(keys::USERS, Accounts::default)
    }

    /// Stored password for `username`, if registered.
    #[must_use]
    pub fn get_password(&self, username: &Username) -> Option<Password> {
        self.all().password(username).cloned()
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Store` if the write fails.
    pub fn create(&self, username: &Username, password: &Password) -> Result<(), RepositoryError> {
        let mut accounts = self.all();
        if !accounts.insert(username.clone(), password.clone()) {
            return Err(RepositoryError::Conflict(username.to_string()));
        }
        self.records.write(keys::USERS, &accounts)?;
        Ok(())
    }
}
