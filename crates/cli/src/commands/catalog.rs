//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List home screen categories
//! greenbasket categories
//!
//! # Show one category screen
//! greenbasket category fruits
//!
//! # Search products by name
//! greenbasket search tomato
//! ```

use greenbasket_cart::views::{CategoryTileView, CategoryView, ProductCardView};
use greenbasket_cart::{GreenbasketConfig, Session};
use greenbasket_core::CategoryId;
use tracing::info;

/// List every category with its product count.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn categories(config: &GreenbasketConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.load_catalog()?;

    info!("Categories");
    for tile in CategoryTileView::all(&catalog) {
        info!("  {:<14} {:<14} {} items", tile.id, tile.name, tile.product_count);
    }
    Ok(())
}

/// Show the products of one category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the category is unknown.
pub fn category(config: &GreenbasketConfig, slug: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::start(config.load_catalog()?, config);
    let view = CategoryView::new(&session, &CategoryId::new(slug), &config.currency_symbol)?;

    info!("{}", view.title);
    for card in &view.products {
        log_card(card);
    }
    Ok(())
}

/// Search products by name.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn search(config: &GreenbasketConfig, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::start(config.load_catalog()?, config);
    let hits = session.catalog().search(query);

    info!(query, matches = hits.len(), "Search results");
    for product in hits {
        log_card(&ProductCardView::new(product, &session, &config.currency_symbol));
    }
    Ok(())
}

fn log_card(card: &ProductCardView) {
    let stock = if card.in_stock { "" } else { " (out of stock)" };
    info!("  [{}] {:<14} {:>10}{stock}", card.id, card.name, card.price);
    if !card.description.is_empty() {
        info!("       {}", card.description);
    }
}
