//! A shopping session.
//!
//! One [`Session`] owns the only cart, the category screen's pending
//! selections and the favorites list for as long as the app runs. Every screen
//! works against the same session, so a product added from a category screen
//! is the same line the cart screen shows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use greenbasket_core::{ProductId, Quantity, SessionId};

use crate::catalog::{Catalog, Product};
use crate::config::GreenbasketConfig;
use crate::error::{Result, SessionError};
use crate::favorites::Favorites;
use crate::line_item::LineItem;
use crate::selection::QuantitySelector;
use crate::store::{CartStore, QuantityChange};

/// Totals shown in cart headers and footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of quantities.
    pub total_item_count: Quantity,
    /// Sum of line totals.
    pub total_price: Decimal,
}

impl From<&CartStore> for CartSummary {
    fn from(cart: &CartStore) -> Self {
        Self {
            line_count: cart.len(),
            total_item_count: cart.total_item_count(),
            total_price: cart.total_price(),
        }
    }
}

/// State for one shopper from app start to app exit.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    catalog: Arc<Catalog>,
    quantity_step: Decimal,
    cart: CartStore,
    selection: QuantitySelector,
    favorites: Favorites,
}

impl Session {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn start(catalog: Arc<Catalog>, config: &GreenbasketConfig) -> Self {
        let id = SessionId::generate();
        info!(session_id = %id, "Session started");
        Self {
            id,
            started_at: Utc::now(),
            catalog,
            quantity_step: config.quantity_step,
            cart: CartStore::new(),
            selection: QuantitySelector::new(),
            favorites: Favorites::new(),
        }
    }

    /// End the session, returning the cart totals at exit.
    #[must_use]
    pub fn end(self) -> CartSummary {
        let summary = self.summary();
        let duration_secs = (Utc::now() - self.started_at).num_seconds();
        info!(
            session_id = %self.id,
            duration_secs,
            lines = summary.line_count,
            total_price = %summary.total_price,
            "Session ended"
        );
        summary
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Quantity change for one tap of a plus/minus button.
    #[must_use]
    pub const fn quantity_step(&self) -> Decimal {
        self.quantity_step
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn selection(&self) -> &QuantitySelector {
        &self.selection
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Current cart totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    /// Change a product's quantity in the cart by `delta`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown, if `delta` is positive
    /// and the product is out of stock, or if the cart rejects the change as
    /// out of range.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn adjust_cart(&mut self, product_id: &ProductId, delta: Decimal) -> Result<QuantityChange> {
        let product = self.catalog.product(product_id)?;
        if delta > Decimal::ZERO {
            ensure_in_stock(product)?;
        }
        accepted(product_id, self.cart.set_quantity(product_id, &product.meta(), delta))
    }

    /// Add one quantity step of a product to the cart.
    ///
    /// # Errors
    ///
    /// See [`Session::adjust_cart`].
    pub fn increment(&mut self, product_id: &ProductId) -> Result<QuantityChange> {
        self.adjust_cart(product_id, self.quantity_step)
    }

    /// Remove one quantity step of a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown.
    pub fn decrement(&mut self, product_id: &ProductId) -> Result<QuantityChange> {
        self.adjust_cart(product_id, -self.quantity_step)
    }

    /// Delete a product's line from the cart. Absent products are a no-op.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Option<LineItem> {
        self.cart.remove_item(product_id)
    }

    /// Change the pending quantity picked on a category screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the new quantity is out
    /// of range.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn adjust_selection(&mut self, product_id: &ProductId, delta: Decimal) -> Result<Quantity> {
        self.catalog.product(product_id)?;
        self.selection
            .adjust(product_id, delta)
            .map_err(|_| SessionError::Overflow(product_id.clone()))
    }

    /// Move a product's pending selection into the cart.
    ///
    /// The selection is cleared only when the cart accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingSelected`] if no quantity is pending,
    /// or an error if the product is unknown, out of stock, or the cart
    /// rejects the quantity as out of range.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn add_selection_to_cart(&mut self, product_id: &ProductId) -> Result<QuantityChange> {
        let product = self.catalog.product(product_id)?;
        let pending = self.selection.quantity(product_id);
        if pending.is_zero() {
            return Err(SessionError::NothingSelected(product_id.clone()));
        }
        ensure_in_stock(product)?;

        let meta = product.meta();
        let change = accepted(
            product_id,
            self.cart.set_quantity(product_id, &meta, pending.value()),
        )?;
        let quantity = self.selection.take(product_id);
        info!(
            product = %meta.name,
            quantity = %quantity,
            unit = %meta.unit,
            "Added to cart"
        );
        Ok(change)
    }

    /// Mark or unmark a product as a favorite. Returns true if it now is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn toggle_favorite(&mut self, product_id: &ProductId) -> Result<bool> {
        self.catalog.product(product_id)?;
        Ok(self.favorites.toggle(product_id))
    }

    /// Add one quantity step of a favorite to the cart.
    ///
    /// # Errors
    ///
    /// See [`Session::adjust_cart`].
    pub fn add_favorite_to_cart(&mut self, product_id: &ProductId) -> Result<QuantityChange> {
        self.increment(product_id)
    }
}

fn accepted(product_id: &ProductId, change: QuantityChange) -> Result<QuantityChange> {
    match change {
        QuantityChange::Rejected => Err(SessionError::Overflow(product_id.clone())),
        change => Ok(change),
    }
}

fn ensure_in_stock(product: &Product) -> Result<()> {
    if product.in_stock {
        Ok(())
    } else {
        Err(SessionError::OutOfStock(product.id.clone()))
    }
}
