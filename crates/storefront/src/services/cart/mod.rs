//! Cart service.
//!
//! Wraps the persisted cart with the login gate. Every mutation is a full
//! read-modify-write of the `cart` record.

mod error;

pub use error::CartError;

use std::num::NonZeroU32;

use tracing::instrument;

use tidepool_core::{Cart, CartEntry, Price, Username};

use crate::store::{CartRepository, KeyValueStore, SessionRepository};

/// Cart service.
pub struct CartService<'a, S: ?Sized> {
    carts: CartRepository<'a, S>,
    sessions: SessionRepository<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> CartService<'a, S> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            carts: CartRepository::new(store),
            sessions: SessionRepository::new(store),
        }
    }

    /// The logged-in username.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest.
    pub fn require_user(&self) -> Result<Username, CartError> {
        self.sessions
            .current()
            .username()
            .cloned()
            .ok_or(CartError::AuthRequired)
    }

    /// The persisted cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.carts.load()
    }

    /// Add one unit of `name` and return the line's new quantity.
    ///
    /// A repeat add bumps the quantity and keeps the first-seen price.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest; the cart is untouched.
    /// Returns `CartError::TotalTooLarge` if the cart total would overflow; the
    /// cart is untouched.
    /// Returns `CartError::Store` if the write fails.
    #[instrument(skip(self))]
    pub fn add_item(&self, name: &str, price: Price) -> Result<NonZeroU32, CartError> {
        let username = self.require_user()?;

        let mut cart = self.carts.load();
        let quantity = cart.add(name, price)?;
        self.carts.save(&cart)?;

        tracing::info!(username = %username, item = name, quantity = quantity.get(), "Added to cart");
        Ok(quantity)
    }

    /// Remove the line at `index` and return it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NoSuchLine` if `index` is out of range; the cart is
    /// untouched.
    /// Returns `CartError::Store` if the write fails.
    #[instrument(skip(self))]
    pub fn remove_item(&self, index: usize) -> Result<CartEntry, CartError> {
        let mut cart = self.carts.load();
        let len = cart.len();
        let removed = cart
            .remove(index)
            .ok_or(CartError::NoSuchLine { index, len })?;
        self.carts.save(&cart)?;

        tracing::info!(item = %removed.name, "Removed from cart");
        Ok(removed)
    }

    /// Clear the cart and return what was in it.
    ///
    /// No order record is created.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AuthRequired` for a guest.
    /// Returns `CartError::EmptyCart` if there is nothing to check out.
    /// Returns `CartError::Store` if the write fails.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<Cart, CartError> {
        let username = self.require_user()?;

        let cart = self.carts.load();
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        self.carts.clear()?;

        tracing::info!(
            username = %username,
            lines = cart.len(),
            total = %cart.total(),
            "Checked out"
        );
        Ok(cart)
    }
}
