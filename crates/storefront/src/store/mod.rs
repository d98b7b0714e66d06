//! Persistent record storage.
//!
//! Every piece of storefront state lives in a flat key-value substrate holding
//! JSON-serialized records:
//!
//! | Key | Shape |
//! |---|---|
//! | `users` | object mapping username to password |
//! | `loggedInUser` | string |
//! | `cart` | array of `{name, price, quantity}` |
//! | `redirectAfterLogin` | string |
//!
//! [`KeyValueStore`] is the raw substrate (in-memory for tests, a JSON file for
//! the binaries). [`Records`] layers typed JSON access on top and never fails a
//! read: missing, unreadable or corrupt values fall back to the caller's
//! default, because the substrate is editable from outside the program.
//!
//! There are no transactions. Two writers sharing one substrate race with
//! last-write-wins semantics.

pub mod cart;
pub mod file;
pub mod memory;
pub mod session;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use cart::CartRepository;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::SessionRepository;
pub use users::UserRepository;

/// Errors from the storage substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored value does not match its schema.
    #[error("corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A lock guarding the substrate was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Errors from the typed repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The substrate failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A flat string key-value substrate.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability so repositories can share one store by reference.
pub trait KeyValueStore: Send + Sync {
    /// Raw value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Typed JSON access to named records.
pub struct Records<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> Records<'a, S> {
    /// Wrap a substrate.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read and decode `key`, falling back to `default` when the value is
    /// missing, corrupt, or the substrate cannot be read.
    pub fn read_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable record, using default");
                default()
            }
        }
    }

    /// Read and decode `key`, reporting corruption instead of hiding it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the value does not decode, or the
    /// substrate's error if it cannot be read.
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Encode and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the write fails.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }
}
