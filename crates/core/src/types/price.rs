//! Non-negative product price using decimal arithmetic.
//!
//! Prices are plain numeric units in the shop's currency (Philippine peso).
//! They serialize as JSON numbers so persisted carts keep the shape
//! `{"name": "...", "price": 250, "quantity": 1}`. An amount a double cannot
//! hold exactly is written as a decimal string instead; both forms read back.

use core::fmt;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency sign used in every rendered amount.
pub const CURRENCY_SIGN: char = '₱';

/// Errors that can occur when creating a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The label could not be read as a number.
    #[error("unreadable price label: {0:?}")]
    Unreadable(String),
    /// The amount does not fit the decimal range.
    #[error("price amount too large")]
    Overflow,
}

/// A non-negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount < 0`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price label as shown on a product card, e.g. `"₱1,250"`.
    ///
    /// The currency sign and thousands separators are stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Unreadable`] if what remains is not a number and
    /// [`PriceError::Negative`] for negative amounts.
    pub fn parse_label(label: &str) -> Result<Self, PriceError> {
        let cleaned: String = label
            .chars()
            .filter(|c| *c != CURRENCY_SIGN && *c != ',')
            .collect();
        let amount = cleaned
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Unreadable(label.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity, saturating at the largest amount.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// This price multiplied by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product is out of range.
    pub fn checked_times(&self, quantity: u32) -> Result<Self, PriceError> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// The sum of two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the sum is out of range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PriceError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(PriceError::Overflow)
    }

    /// Format for display, e.g. `"₱25"` or `"₱12.5"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SIGN}{}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at the largest amount; see [`Price::checked_add`].
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = self.0.normalize();
        if amount.fract().is_zero() {
            if let Some(whole) = amount.to_u64() {
                return serializer.serialize_u64(whole);
            }
        }
        // Amounts a double cannot hold exactly are written as decimal strings
        match amount.to_f64() {
            Some(float) if reads_back_as(float, amount) => serializer.serialize_f64(float),
            _ => serializer.serialize_str(&amount.to_string()),
        }
    }
}

fn reads_back_as(float: f64, amount: Decimal) -> bool {
    float
        .to_string()
        .parse::<Decimal>()
        .is_ok_and(|parsed| parsed == amount)
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(
            Price::parse_label("₱1,250").unwrap(),
            Price::from_units(1250)
        );
        assert_eq!(
            Price::parse_label(" ₱99.50 ").unwrap().amount(),
            Decimal::new(9950, 2)
        );
        assert!(matches!(
            Price::parse_label("₱call us"),
            Err(PriceError::Unreadable(_))
        ));
        assert!(Price::parse_label("").is_err());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_units(10).times(2), Price::from_units(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(25));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(25).display(), "₱25");
        assert_eq!(Price::parse_label("12.50").unwrap().display(), "₱12.5");
    }

    #[test]
    fn test_json_shape() {
        assert_eq!(serde_json::to_string(&Price::from_units(10)).unwrap(), "10");
        assert_eq!(
            serde_json::to_string(&Price::parse_label("2.5").unwrap()).unwrap(),
            "2.5"
        );
        let price: Price = serde_json::from_str("149").unwrap();
        assert_eq!(price, Price::from_units(149));
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_reads_numbers_and_strings() {
        let price: Price = serde_json::from_str("99.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(995, 1));

        let price: Price = serde_json::from_str(r#""1250""#).unwrap();
        assert_eq!(price, Price::from_units(1250));
    }

    #[test]
    fn test_precise_amounts_survive_json() {
        let precise = Price::parse_label("12345678901234567.123456789").unwrap();
        let json = serde_json::to_string(&precise).unwrap();
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), precise);

        let huge = Price::parse_label("50,000,000,000,000,000,000,000,000,000").unwrap();
        let json = serde_json::to_string(&huge).unwrap();
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), huge);
    }

    #[test]
    fn test_arithmetic_overflow() {
        let huge = Price::parse_label("50,000,000,000,000,000,000,000,000,000").unwrap();

        assert_eq!(huge.checked_add(huge), Err(PriceError::Overflow));
        assert_eq!(huge.checked_times(2), Err(PriceError::Overflow));
        assert_eq!(huge.checked_times(1), Ok(huge));
        assert_eq!(huge + huge, Price::new(Decimal::MAX).unwrap());
        assert_eq!(huge.times(3), Price::new(Decimal::MAX).unwrap());
    }
}
