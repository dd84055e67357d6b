//! Type-safe price representation using decimal arithmetic.
//!
//! Green Basket sells in a single currency, so a [`Price`] is just a
//! non-negative decimal amount per catalog unit. The currency symbol is a
//! display concern handled by the views.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative unit price.
///
/// ## Examples
///
/// ```
/// use greenbasket_core::{Price, Quantity};
///
/// let tomatoes = Price::parse("40").unwrap();
/// let qty = Quantity::parse("1.5").unwrap();
/// assert_eq!(tomatoes.total_for(qty).unwrap().to_string(), "60.0");
///
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price from a decimal string such as `"40"` or `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price, or `None` if the
    /// product is not representable.
    #[must_use]
    pub fn total_for(&self, quantity: Quantity) -> Option<Decimal> {
        self.0.checked_mul(quantity.value())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert_eq!(Price::parse("40").unwrap(), Price::from_units(40));
        assert_eq!(Price::parse(" 12.50 ").unwrap().amount(), Decimal::new(1250, 2));
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-0.01"), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Price::parse("forty"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Price::new(-Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_total_for_half_kilo() {
        let price = Price::from_units(25);
        let half = Quantity::parse("0.5").unwrap();
        assert_eq!(price.total_for(half), Some(Decimal::new(125, 1)));
    }

    #[test]
    fn test_total_for_overflow() {
        let huge = Quantity::new(Decimal::MAX).unwrap();
        assert_eq!(Price::from_units(40).total_for(huge), None);
        assert_eq!(Price::ZERO.total_for(huge), Some(Decimal::ZERO));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("\"-3\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Price::parse("120.00").unwrap().to_string(), "120");
    }
}
