//! Application state shared across handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::notify::Notifier;
use crate::services::{ContactClient, ContactError, Shop};
use crate::store::KeyValueStore;

/// Application state shared across all handlers.
///
/// The server hosts a single storefront profile: one users mapping, one
/// session, one cart. Every storefront operation runs under `guard`, so two
/// requests never interleave a read-modify-write of the same record.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn KeyValueStore>,
    contact: Option<ContactClient>,
    guard: Mutex<()>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Storage substrate for every record
    ///
    /// # Errors
    ///
    /// Returns an error if the contact form HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ContactError> {
        let contact = config
            .contact_endpoint
            .clone()
            .map(ContactClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                contact,
                guard: Mutex::new(()),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage substrate.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get the contact form client, if an endpoint is configured.
    #[must_use]
    pub fn contact(&self) -> Option<&ContactClient> {
        self.inner.contact.as_ref()
    }

    /// Run one storefront operation with exclusive access to the store.
    ///
    /// The guard protects no data of its own, so a panic in an earlier
    /// operation does not lock later ones out.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error.
    pub fn with_shop<N, T, E>(
        &self,
        notifier: &N,
        op: impl FnOnce(&Shop<'_, dyn KeyValueStore, N>) -> Result<T, E>,
    ) -> Result<T, AppError>
    where
        N: Notifier,
        E: Into<AppError>,
    {
        let _guard = self
            .inner
            .guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let shop = Shop::new(self.inner.store.as_ref(), notifier)
            .with_return_to(self.config().return_page.clone());
        op(&shop).map_err(Into::into)
    }
}
