//! Fractional quantities sold by weight.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below zero.
    #[error("quantity cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid quantity: {0}")]
    Invalid(String),
    /// The result does not fit in a [`Decimal`].
    #[error("quantity out of range")]
    Overflow,
}

/// A non-negative amount of some unit (kilograms, bunches, pieces).
///
/// Backed by [`Decimal`], so `0.5 + 0.5 - 1` is exactly zero.
///
/// ```
/// use greenbasket_core::Quantity;
/// use rust_decimal::Decimal;
///
/// let half = Decimal::new(5, 1);
/// let q = Quantity::ZERO.adjusted_by(half)?.adjusted_by(half)?;
/// assert!(q.adjusted_by(-Decimal::ONE)?.is_zero());
///
/// // Over-decrementing clamps at zero.
/// assert!(q.adjusted_by(Decimal::from(-10))?.is_zero());
/// # Ok::<(), greenbasket_core::QuantityError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Nothing.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Negative`] if `value` is below zero.
    pub fn new(value: Decimal) -> Result<Self, QuantityError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuantityError::Negative(value));
        }
        Ok(Self(value.abs()))
    }

    /// Parse a quantity from a decimal string such as `"1.5"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal or is negative.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| QuantityError::Invalid(s.to_owned()))?;
        Self::new(value)
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Apply a signed change, clamping the result at zero.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the sum is not representable.
    pub fn adjusted_by(self, delta: Decimal) -> Result<Self, QuantityError> {
        let next = self.0.checked_add(delta).ok_or(QuantityError::Overflow)?;
        if next.is_sign_negative() || next.is_zero() {
            Ok(Self::ZERO)
        } else {
            Ok(Self(next))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = QuantityError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Saturates at [`Decimal::MAX`] instead of overflowing.
impl core::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        Self(
            iter.try_fold(Decimal::ZERO, |acc, q| acc.checked_add(q.0))
                .unwrap_or(Decimal::MAX),
        )
    }
}
