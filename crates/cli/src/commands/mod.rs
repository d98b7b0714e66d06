//! Subcommand implementations.
//!
//! Each command runs one storefront operation through a [`Shop`] and returns
//! the text to print. Notices are shown by the notifier as they happen.
//!
//! [`Shop`]: tidepool_storefront::services::Shop

pub mod account;
pub mod cart;
pub mod contact;

use thiserror::Error;

use tidepool_storefront::services::{AuthError, CartError, ContactError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    /// Product name or price label could not be read.
    #[error("unreadable product: name {name:?}, price {price:?}")]
    BadProduct { name: String, price: String },
}
