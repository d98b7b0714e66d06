//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password left blank.
    #[error("username and password are required")]
    MissingFields,

    /// Registration with a username that is already taken.
    #[error("username already exists: {0}")]
    DuplicateAccount(String),

    /// Login with a username that was never registered.
    #[error("account does not exist")]
    AccountNotFound,

    /// Login with the wrong password.
    #[error("incorrect password")]
    BadCredentials,

    /// Storage write failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
