//! Display data for the storefront screens.
//!
//! Views are plain snapshots with money and quantities already formatted;
//! building one never touches session state.

use rust_decimal::Decimal;
use serde::Serialize;

use greenbasket_core::{CategoryId, Price};

use crate::catalog::{Catalog, Product};
use crate::error::CatalogError;
use crate::line_item::LineItem;
use crate::session::Session;
use crate::store::CartStore;

/// Format a money amount with two decimal places, e.g. `₹80.00`.
#[must_use]
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{symbol}{:.2}", amount.round_dp(2))
}

/// Format a unit price, e.g. `₹40/kg`.
#[must_use]
pub fn format_unit_price(price: Price, unit: &str, symbol: &str) -> String {
    format!("{symbol}{price}/{unit}")
}

// =============================================================================
// Cart
// =============================================================================

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: String,
    pub line_total: String,
}

/// Cart screen display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: String,
}

impl CartItemView {
    fn new(item: &LineItem, symbol: &str) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            unit_price: format_unit_price(item.unit_price, &item.unit, symbol),
            quantity: item.quantity.to_string(),
            line_total: format_money(item.line_total(), symbol),
        }
    }
}

impl CartView {
    /// Render the cart.
    #[must_use]
    pub fn new(cart: &CartStore, symbol: &str) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, symbol))
                .collect(),
            total: format_money(cart.total_price(), symbol),
            item_count: cart.total_item_count().to_string(),
        }
    }

    /// Returns true when the "your cart is empty" state should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Home and category screens
// =============================================================================

/// Home screen category tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTileView {
    pub id: String,
    pub name: String,
    pub product_count: usize,
}

impl CategoryTileView {
    /// One tile per catalog category, in display order.
    #[must_use]
    pub fn all(catalog: &Catalog) -> Vec<Self> {
        catalog
            .categories()
            .iter()
            .map(|category| Self {
                id: category.id.to_string(),
                name: category.name.clone(),
                product_count: catalog.count_in(&category.id),
            })
            .collect()
    }
}

/// Product card on a category screen or in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub in_stock: bool,
    /// Pending quantity chosen with the plus/minus buttons.
    pub selected: String,
}

impl ProductCardView {
    /// Card for a product with the session's pending selection.
    #[must_use]
    pub fn new(product: &Product, session: &Session, symbol: &str) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_unit_price(product.price, &product.unit, symbol),
            description: product.description.clone(),
            in_stock: product.in_stock,
            selected: session.selection().quantity(&product.id).to_string(),
        }
    }
}

/// Category screen display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub title: String,
    pub products: Vec<ProductCardView>,
}

impl CategoryView {
    /// Render a category screen.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCategory`] for an unknown slug.
    pub fn new(session: &Session, id: &CategoryId, symbol: &str) -> Result<Self, CatalogError> {
        let catalog = session.catalog();
        let category = catalog.category(id)?;
        let products = catalog
            .products_in(id)?
            .into_iter()
            .map(|product| ProductCardView::new(product, session, symbol))
            .collect();
        Ok(Self {
            id: category.id.to_string(),
            title: category.title.clone(),
            products,
        })
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// Favorite card display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
}

/// Favorites screen display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesView {
    pub items: Vec<FavoriteView>,
}

impl FavoritesView {
    /// Render the favorites screen. Favorites no longer in the catalog are skipped.
    #[must_use]
    pub fn new(session: &Session, symbol: &str) -> Self {
        let catalog = session.catalog();
        let items = session
            .favorites()
            .ids()
            .iter()
            .filter_map(|id| catalog.product(id).ok())
            .map(|product| FavoriteView {
                id: product.id.to_string(),
                name: product.name.clone(),
                price: format_unit_price(product.price, &product.unit, symbol),
                category: catalog
                    .category(&product.category)
                    .map_or_else(|_| product.category.to_string(), |c| c.name.clone()),
            })
            .collect();
        Self { items }
    }
}
