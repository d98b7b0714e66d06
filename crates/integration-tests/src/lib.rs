//! Integration tests for Tidepool.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tidepool-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_accounts` - Signup, login, logout and redirect resumption
//! - `storefront_cart` - Cart, checkout and buy-now through the controller
//! - `storefront_persistence` - File-backed records and corrupt data
//! - `storefront_http` - The JSON surface through the axum router
//!
//! Everything runs against in-memory or temp-file stores; no server or
//! network is needed.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use tidepool_storefront::config::StorefrontConfig;
use tidepool_storefront::notify::CollectingNotifier;
use tidepool_storefront::services::Shop;
use tidepool_storefront::state::AppState;
use tidepool_storefront::store::{KeyValueStore, MemoryStore};

/// One shopper's browser: a store and a notifier.
#[derive(Default)]
pub struct TestContext {
    pub store: MemoryStore,
    pub notifier: CollectingNotifier,
}

impl TestContext {
    /// Fresh, empty storefront.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A storefront whose confirmation prompts are answered with `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            store: MemoryStore::new(),
            notifier: CollectingNotifier::answering(answer),
        }
    }

    /// Controller for the next UI event.
    #[must_use]
    pub fn shop(&self) -> Shop<'_, MemoryStore, CollectingNotifier> {
        Shop::new(&self.store, &self.notifier)
    }

    /// Register and log in `username`, then forget the notices it produced.
    ///
    /// # Panics
    ///
    /// Panics if signup or login fails.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn logged_in(username: &str) -> Self {
        let ctx = Self::new();
        ctx.shop().register(username, "hunter2").unwrap();
        ctx.shop().login(username, "hunter2").unwrap();
        let _ = ctx.notifier.drain();
        ctx
    }

    /// Raw JSON stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key).ok().flatten()
    }
}

/// App state over a fresh in-memory store.
///
/// # Panics
///
/// Panics if the state cannot be built.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn app_state() -> AppState {
    AppState::new(StorefrontConfig::default(), Arc::new(MemoryStore::new())).unwrap()
}

/// A data file path inside a fresh temp directory. The directory, and the
/// file with it, is deleted when the returned guard drops.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[allow(clippy::unwrap_used)]
#[must_use]
pub fn temp_data_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidepool.json");
    (dir, path)
}
