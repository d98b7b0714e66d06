//! Session and redirect-target repository.

use tidepool_core::{PageTarget, Username};

use super::{KeyValueStore, Records, StoreError};
use crate::models::{CurrentUser, keys};

/// Repository for the `loggedInUser` and `redirectAfterLogin` records.
pub struct SessionRepository<'a, S: ?Sized> {
    records: Records<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> SessionRepository<'a, S> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
        }
    }

    /// The stored session identity.
    ///
    /// Not checked against the account mapping: a stored username counts as
    /// logged in even if the account no longer exists.
    #[must_use]
    pub fn current(&self) -> CurrentUser {
        self.records
            .read_or::<Option<Username>, _>(keys::LOGGED_IN_USER, || None)
            .into()
    }

    /// Start a session for `username`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn start(&self, username: &Username) -> Result<(), StoreError> {
        self.records.write(keys::LOGGED_IN_USER, username)
    }

    /// End the session. Safe to call when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn end(&self) -> Result<(), StoreError> {
        self.records.remove(keys::LOGGED_IN_USER)
    }

    /// Remember where to resume after the next login.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn set_redirect(&self, target: &PageTarget) -> Result<(), StoreError> {
        self.records.write(keys::REDIRECT_AFTER_LOGIN, target)
    }

    /// The pending redirect target without consuming it.
    #[must_use]
    pub fn redirect(&self) -> Option<PageTarget> {
        self.records.read_or(keys::REDIRECT_AFTER_LOGIN, || None)
    }

    /// Read and delete the pending redirect target.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    pub fn take_redirect(&self) -> Result<Option<PageTarget>, StoreError> {
        let target = self.redirect();
        self.records.remove(keys::REDIRECT_AFTER_LOGIN)?;
        Ok(target)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_session_lifecycle() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        assert_eq!(sessions.current(), CurrentUser::Guest);

        let name = Username::parse("squirt").unwrap();
        sessions.start(&name).unwrap();
        assert_eq!(sessions.current(), CurrentUser::Authenticated(name));

        sessions.end().unwrap();
        sessions.end().unwrap();
        assert_eq!(sessions.current(), CurrentUser::Guest);
    }

    #[test]
    fn test_take_redirect_consumes() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        sessions.set_redirect(&PageTarget::new("cart.html")).unwrap();

        assert_eq!(
            sessions.take_redirect().unwrap(),
            Some(PageTarget::new("cart.html"))
        );
        assert_eq!(sessions.take_redirect().unwrap(), None);
    }

    #[test]
    fn test_blank_stored_session_is_guest() {
        let store = MemoryStore::with_entries([(keys::LOGGED_IN_USER, "\"   \"")]);
        assert_eq!(SessionRepository::new(&store).current(), CurrentUser::Guest);
    }
}
