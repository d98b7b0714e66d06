//! Shopping cart entries and aggregation rules.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::price::{Price, PriceError};

/// One distinct product line with an aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product name; the deduplication key.
    pub name: String,
    /// Unit price, fixed when the line was first added.
    pub price: Price,
    /// Number of units, always at least one.
    pub quantity: NonZeroU32,
}

impl CartEntry {
    /// A new line with quantity one.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}

/// An ordered sequence of cart entries, at most one per distinct name.
///
/// Lookup is a linear scan by name; the order of first insertion is kept.
/// The total of a cart always fits the price range: adds that would push it
/// past are refused, and stored carts over it fail to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of `name`.
    ///
    /// If a line with the same name exists its quantity goes up by one and its
    /// price is left as first seen. Otherwise a new line is appended. Returns
    /// the line's quantity after the add.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`], leaving the cart unchanged, if the
    /// new total would not fit.
    pub fn add(&mut self, name: &str, price: Price) -> Result<NonZeroU32, PriceError> {
        let unit = self.get(name).map_or(price, |entry| entry.price);
        checked_total(&self.entries)?.checked_add(unit)?;

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            entry.quantity = entry.quantity.checked_add(1).ok_or(PriceError::Overflow)?;
            return Ok(entry.quantity);
        }
        self.entries.push(CartEntry::new(name, price));
        Ok(NonZeroU32::MIN)
    }

    /// Remove the line at `index`, returning it, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<CartEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        compute_total(&self.entries)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity.get()))
            .sum()
    }

    /// Find a line by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl TryFrom<Vec<CartEntry>> for Cart {
    type Error = PriceError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        checked_total(&entries)?;
        Ok(Self { entries })
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl FromIterator<CartEntry> for Cart {
    fn from_iter<I: IntoIterator<Item = CartEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Pure total over any slice of entries: `sum(price * quantity)`.
///
/// Saturates at the largest amount; use [`checked_total`] to detect that.
#[must_use]
pub fn compute_total(entries: &[CartEntry]) -> Price {
    entries.iter().map(CartEntry::line_total).sum()
}

/// Like [`compute_total`], but fails instead of saturating.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if a line total or the sum is out of range.
pub fn checked_total(entries: &[CartEntry]) -> Result<Price, PriceError> {
    entries.iter().try_fold(Price::ZERO, |total, entry| {
        total.checked_add(entry.price.checked_times(entry.quantity.get())?)
    })
}
