//! Type-safe price representation using decimal arithmetic.
//!
//! All monetary amounts in QuickCart flow through [`Price`], which wraps a
//! [`rust_decimal::Decimal`] so cart arithmetic stays exact. Rounding to two
//! decimal places happens only when formatting for display, never while
//! accumulating totals.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store's single display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer count of cents (e.g., `999` is `9.99`).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Get the exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The exact amount for `quantity` units at this price.
    #[must_use]
    pub fn extended(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., `$19.99`), rounding to two decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 2)).is_err());
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(999, 2)).is_ok());
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(999).unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 2));
        assert!(Price::from_cents(-1).is_err());
    }

    #[test]
    fn test_extended_is_exact() {
        let price = Price::from_cents(999).unwrap();
        assert_eq!(price.extended(3), Decimal::new(2997, 2));
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::from_cents(1999).unwrap().to_string(), "$19.99");
        assert_eq!(Price::from_cents(1000).unwrap().to_string(), "$10.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, Price::from_cents(1999).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }

    #[test]
    fn test_ordering() {
        let low = Price::from_cents(500).unwrap();
        let high = Price::from_cents(501).unwrap();
        assert!(low < high);
    }
}
