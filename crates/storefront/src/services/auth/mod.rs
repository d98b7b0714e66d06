//! Authentication service.
//!
//! Registers accounts and tracks the single current session. Credentials are
//! compared in plaintext against the stored mapping; there is no hashing and
//! no server verification.

mod error;

pub use error::AuthError;

use tracing::instrument;

use tidepool_core::{PageTarget, Password, Username};

use crate::models::CurrentUser;
use crate::store::{KeyValueStore, RepositoryError, SessionRepository, UserRepository};

/// Authentication service.
///
/// Handles registration, login, logout and session queries.
pub struct AuthService<'a, S: ?Sized> {
    users: UserRepository<'a, S>,
    sessions: SessionRepository<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            users: UserRepository::new(store),
            sessions: SessionRepository::new(store),
        }
    }

    /// Register a new account.
    ///
    /// The username is trimmed before comparison and storage; the password is
    /// stored exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is blank.
    /// Returns `AuthError::DuplicateAccount` if the username is taken.
    /// Returns `AuthError::Store` if the write fails.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<Username, AuthError> {
        let (username, password) = parse_credentials(username, password)?;

        self.users
            .create(&username, &password)
            .map_err(|e| match e {
                RepositoryError::Conflict(name) => AuthError::DuplicateAccount(name),
                RepositoryError::Store(e) => AuthError::Store(e),
            })?;

        tracing::info!(username = %username, "Account registered");
        Ok(username)
    }

    /// Log in and return where to go next.
    ///
    /// On success the session is set and the pending redirect target is
    /// consumed; without one the default landing page is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is blank.
    /// Returns `AuthError::AccountNotFound` if the username is not registered.
    /// Returns `AuthError::BadCredentials` if the password does not match exactly.
    /// Returns `AuthError::Store` if the session write fails.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<(Username, PageTarget), AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::MissingFields)?;
        if password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let stored = self
            .users
            .get_password(&username)
            .ok_or(AuthError::AccountNotFound)?;

        if !stored.matches(password) {
            tracing::debug!(username = %username, "Password mismatch");
            return Err(AuthError::BadCredentials);
        }

        self.sessions.start(&username)?;
        let target = self
            .sessions
            .take_redirect()?
            .unwrap_or_else(PageTarget::default_landing);

        tracing::info!(username = %username, redirect = %target, "Logged in");
        Ok((username, target))
    }

    /// End the current session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the write fails.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.end()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The current session identity, or `Guest`.
    #[must_use]
    pub fn current_user(&self) -> CurrentUser {
        self.sessions.current()
    }
}

/// Validate form input: trimmed non-empty username, non-empty password.
fn parse_credentials(username: &str, password: &str) -> Result<(Username, Password), AuthError> {
    let username = Username::parse(username).map_err(|_| AuthError::MissingFields)?;
    let password = Password::new(password).map_err(|_| AuthError::MissingFields)?;
    Ok((username, password))
}
