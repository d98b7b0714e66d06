//! Cart error types.

use thiserror::Error;

use tidepool_core::PriceError;

use crate::store::StoreError;

/// Errors that can occur during cart and purchase operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The action needs a logged-in user.
    #[error("login required")]
    AuthRequired,

    /// Checkout with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Removal index past the end of the cart.
    #[error("no cart line at index {index} (cart has {len})")]
    NoSuchLine { index: usize, len: usize },

    /// The add would push the cart total past the price range.
    #[error("cart total too large: {0}")]
    TotalTooLarge(#[from] PriceError),

    /// Storage write failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
