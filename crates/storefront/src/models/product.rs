//! Product data read off a product card.

use serde::{Deserialize, Serialize};

use tidepool_core::Price;

/// A product as the buy/add buttons see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Price,
}

impl Product {
    /// Read a product from the card's title and price label (e.g. `"₱1,250"`).
    ///
    /// Returns `None` when the title is missing or blank, or the price label
    /// is missing or unreadable; the button press is then ignored.
    #[must_use]
    pub fn from_card(title: Option<&str>, price_label: Option<&str>) -> Option<Self> {
        let name = title.map(str::trim).filter(|t| !t.is_empty())?;
        let price = Price::parse_label(price_label?).ok()?;
        Some(Self {
            name: name.to_owned(),
            price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_card() {
        let product = Product::from_card(Some(" Blue Tang "), Some("₱1,250")).unwrap();
        assert_eq!(product.name, "Blue Tang");
        assert_eq!(product.price, Price::from_units(1250));
    }

    #[test]
    fn test_incomplete_card_ignored() {
        assert!(Product::from_card(None, Some("₱10")).is_none());
        assert!(Product::from_card(Some("  "), Some("₱10")).is_none());
        assert!(Product::from_card(Some("Koi"), None).is_none());
        assert!(Product::from_card(Some("Koi"), Some("sold out")).is_none());
    }
}
