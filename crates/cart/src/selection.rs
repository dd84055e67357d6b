//! Pending quantities chosen on a category screen.
//!
//! The shopper picks an amount with the plus/minus buttons first and only then
//! taps "add to cart". The selector follows the cart's arithmetic: decimal
//! steps, clamping at zero, and entries at zero are forgotten.

use std::collections::HashMap;

use rust_decimal::Decimal;

use greenbasket_core::{ProductId, Quantity, QuantityError};

/// Per-product pending quantities.
#[derive(Debug, Clone, Default)]
pub struct QuantitySelector {
    pending: HashMap<ProductId, Quantity>,
}

impl QuantitySelector {
    /// Create an empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the pending quantity for a product and return the new value.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the new quantity is not
    /// representable. The pending quantity is left unchanged.
    pub fn adjust(
        &mut self,
        product_id: &ProductId,
        delta: Decimal,
    ) -> Result<Quantity, QuantityError> {
        let next = self.quantity(product_id).adjusted_by(delta)?;
        if next.is_zero() {
            self.pending.remove(product_id);
        } else {
            self.pending.insert(product_id.clone(), next);
        }
        Ok(next)
    }

    /// Pending quantity for a product, zero if nothing is selected.
    #[must_use]
    pub fn quantity(&self, product_id: &ProductId) -> Quantity {
        self.pending.get(product_id).copied().unwrap_or_default()
    }

    /// Remove and return the pending quantity for a product.
    pub fn take(&mut self, product_id: &ProductId) -> Quantity {
        self.pending.remove(product_id).unwrap_or_default()
    }

    /// Returns true if no product has a pending quantity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn half() -> Decimal {
        Decimal::new(5, 1)
    }

    #[test]
    fn test_unknown_product_is_zero() {
        let selector = QuantitySelector::new();
        assert!(selector.quantity(&ProductId::new("4")).is_zero());
    }

    #[test]
    fn test_adjust_accumulates() {
        let mut selector = QuantitySelector::new();
        let id = ProductId::new("4");
        selector.adjust(&id, half()).unwrap();
        let q = selector.adjust(&id, half()).unwrap();
        assert_eq!(q, Quantity::parse("1").unwrap());
        assert_eq!(selector.quantity(&id), q);
    }

    #[test]
    fn test_adjust_to_zero_forgets_entry() {
        let mut selector = QuantitySelector::new();
        let id = ProductId::new("4");
        selector.adjust(&id, half()).unwrap();
        selector.adjust(&id, -Decimal::ONE).unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn test_take_clears_selection() {
        let mut selector = QuantitySelector::new();
        let id = ProductId::new("9");
        selector.adjust(&id, Decimal::from(2)).unwrap();

        assert_eq!(selector.take(&id), Quantity::parse("2").unwrap());
        assert!(selector.take(&id).is_zero());
    }

    #[test]
    fn test_adjust_overflow_keeps_selection() {
        let mut selector = QuantitySelector::new();
        let id = ProductId::new("9");
        selector.adjust(&id, Decimal::MAX).unwrap();

        assert_eq!(selector.adjust(&id, Decimal::ONE), Err(QuantityError::Overflow));
        assert_eq!(selector.quantity(&id).value(), Decimal::MAX);
    }
}
