//! Plaintext account password.
//!
//! Passwords are kept exactly as typed and persisted in plaintext next to the
//! username. This mirrors a purely client-side storefront where the storage is
//! readable by anyone with access to the device; it is not an authentication
//! system and must not be used as one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input string is empty.
    #[error("password cannot be empty")]
    Empty,
}

/// A plaintext password, stored verbatim (no trimming, no hashing).
///
/// `Debug` is redacted so passwords do not end up in log output; the value is
/// still serialized as-is.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Password(String);

impl Password {
    /// Create a password from user input.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] for an empty string. Whitespace-only
    /// passwords are accepted as typed.
    pub fn new(s: &str) -> Result<Self, PasswordError> {
        if s.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Exact, case-sensitive comparison against a candidate.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl TryFrom<String> for Password {
    type Error = PasswordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(value))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.0
    }
}
