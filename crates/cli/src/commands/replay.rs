//! Replay a scripted shopping session.
//!
//! # Usage
//!
//! ```bash
//! # Replay and log the resulting cart
//! greenbasket replay session.yaml
//!
//! # Replay and print the report as JSON
//! greenbasket replay session.yaml --json
//! ```

use std::path::Path;

use greenbasket_cart::script::load_script;
use greenbasket_cart::views::{CartView, FavoritesView, format_money};
use greenbasket_cart::{GreenbasketConfig, ReplayReport, Session, replay};
use tracing::{error, info};

/// Replay a script against a fresh session.
///
/// # Errors
///
/// Returns an error if the catalog or script cannot be loaded.
pub fn run(
    config: &GreenbasketConfig,
    script_path: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(script_path);
    if !path.exists() {
        return Err(format!("File not found: {script_path}").into());
    }

    let actions = load_script(path)?;
    let mut session = Session::start(config.load_catalog()?, config);
    let report = replay(&mut session, &actions);

    let symbol = &config.currency_symbol;
    let cart = CartView::new(session.cart(), symbol);
    let favorites = FavoritesView::new(&session, symbol);
    let summary = session.end();

    if json {
        let report = ReplayReport { summary, ..report };
        print_json(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    info!("Replay complete!");
    info!("  Actions applied: {}", report.applied);
    if !report.errors.is_empty() {
        error!("  Errors: {}", report.errors.len());
        for failure in &report.errors {
            error!("    - #{}: {}", failure.index, failure.message);
        }
    }

    if cart.is_empty() {
        info!("Your cart is empty");
    } else {
        info!("Shopping Cart ({} items)", summary.total_item_count);
        for item in &cart.items {
            info!(
                "  {:<14} {:>10} x {:<5} {:>10}",
                item.name, item.unit_price, item.quantity, item.line_total
            );
        }
        info!("Total Amount: {}", format_money(summary.total_price, symbol));
    }

    if !favorites.items.is_empty() {
        info!("Favorites ({} items)", favorites.items.len());
        for favorite in &favorites.items {
            info!("  {:<14} {:>10} {}", favorite.name, favorite.price, favorite.category);
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json(output: &str) {
    println!("{output}");
}
