//! Cart repository.

use tidepool_core::Cart;

use super::{KeyValueStore, Records, StoreError};
use crate::models::keys;

/// Repository for the `cart` record.
pub struct CartRepository<'a, S: ?Sized> {
    records: Records<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            records: Records::new(store),
        }
    }

    /// The persisted cart; missing or corrupt reads as empty.
    #[must_use]
    pub fn load(&self) -> Cart {
        self.records.read_or(keys::CART, Cart::new)
    }

    /// Persist `cart`, replacing the stored one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.records.write(keys::CART, cart)
    }

    /// Delete the cart record entirely.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.records.remove(keys::CART)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tidepool_core::Price;

    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};

    #[test]
    fn test_invalid_json_reads_empty() {
        let store = MemoryStore::with_entries([(keys::CART, "{{oops")]);
        assert!(CartRepository::new(&store).load().is_empty());
    }

    #[test]
    fn test_save_clear() {
        let store = MemoryStore::new();
        let carts = CartRepository::new(&store);
        let mut cart = Cart::new();
        cart.add("Seahorse", Price::from_units(450)).unwrap();

        carts.save(&cart).unwrap();
        assert_eq!(carts.load(), cart);

        carts.clear().unwrap();
        assert!(store.get(keys::CART).unwrap().is_none());
        assert!(carts.load().is_empty());
    }
}
