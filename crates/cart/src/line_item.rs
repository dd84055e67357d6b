//! Cart line items and the catalog metadata used to create them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::{Price, ProductId, Quantity};

/// Display metadata and unit price supplied by the catalog when a product is
/// first added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMeta {
    /// Product display name.
    pub name: String,
    /// Unit the price applies to (e.g. `kg`).
    pub unit: String,
    /// Price per unit.
    pub unit_price: Price,
}

impl ProductMeta {
    /// Create product metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>, unit_price: Price) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            unit_price,
        }
    }
}

/// One product entry in the cart.
///
/// A line item held by a [`CartStore`](crate::CartStore) always has a positive
/// quantity. Values handed out by the store are copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product ID (unique within a cart).
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit the price applies to.
    pub unit: String,
    /// Price per unit.
    pub unit_price: Price,
    /// Quantity in `unit`s.
    pub quantity: Quantity,
}

impl LineItem {
    pub(crate) fn new(id: ProductId, meta: &ProductMeta, quantity: Quantity) -> Self {
        Self {
            id,
            name: meta.name.clone(),
            unit: meta.unit.clone(),
            unit_price: meta.unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .total_for(self.quantity)
            .unwrap_or(Decimal::MAX)
    }
}
