//! User account mapping.
//!
//! Accounts are a flat username -> password object. Passwords are plaintext;
//! see [`tidepool_core::Password`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tidepool_core::{Password, Username};

/// Every registered account, keyed by unique username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accounts(BTreeMap<Username, Password>);

impl Accounts {
    /// Whether `username` is registered.
    #[must_use]
    pub fn contains(&self, username: &Username) -> bool {
        self.0.contains_key(username)
    }

    /// Stored password for `username`.
    #[must_use]
    pub fn password(&self, username: &Username) -> Option<&Password> {
        self.0.get(username)
    }

    /// Insert an account. Returns `false` and leaves the mapping untouched if
    /// the username is taken.
    pub fn insert(&mut self, username: Username, password: Password) -> bool {
        if self.contains(&username) {
            return false;
        }
        self.0.insert(username, password);
        true
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
