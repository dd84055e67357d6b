//! Replay a scripted sequence of shopper actions against a session.
//!
//! Scripts are YAML lists of actions:
//!
//! ```yaml
//! - { action: select, product: "7", delta: "1.5" }
//! - { action: add_selection, product: "7" }
//! - { action: adjust, product: "10", delta: "-0.5" }
//! - { action: remove, product: "4" }
//! - { action: toggle_favorite, product: "4" }
//! - { action: add_favorite, product: "4" }
//! ```
//!
//! A failing action is recorded in the report and replay continues, the same
//! way a shopper sees an alert and keeps tapping.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use greenbasket_core::ProductId;

use crate::error::{Result, ScriptError};
use crate::session::{CartSummary, Session};

/// One shopper interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    /// Change a product's cart quantity.
    Adjust { product: ProductId, delta: Decimal },
    /// Delete a product's cart line.
    Remove { product: ProductId },
    /// Change a pending category-screen selection.
    Select { product: ProductId, delta: Decimal },
    /// Move a pending selection into the cart.
    AddSelection { product: ProductId },
    /// Mark or unmark a favorite.
    ToggleFavorite { product: ProductId },
    /// Add one quantity step of a favorite to the cart.
    AddFavorite { product: ProductId },
}

impl CartAction {
    fn apply(&self, session: &mut Session) -> Result<()> {
        match self {
            Self::Adjust { product, delta } => {
                session.adjust_cart(product, *delta)?;
            }
            Self::Remove { product } => {
                session.remove_from_cart(product);
            }
            Self::Select { product, delta } => {
                session.adjust_selection(product, *delta)?;
            }
            Self::AddSelection { product } => {
                session.add_selection_to_cart(product)?;
            }
            Self::ToggleFavorite { product } => {
                session.toggle_favorite(product)?;
            }
            Self::AddFavorite { product } => {
                session.add_favorite_to_cart(product)?;
            }
        }
        Ok(())
    }
}

/// A failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionFailure {
    /// Zero-based position in the script.
    pub index: usize,
    pub message: String,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Number of actions that succeeded.
    pub applied: usize,
    pub errors: Vec<ActionFailure>,
    /// Cart totals after the last action.
    pub summary: CartSummary,
}

/// Parse a script from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or names an unknown action.
pub fn parse_script(yaml: &str) -> std::result::Result<Vec<CartAction>, ScriptError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> std::result::Result<Vec<CartAction>, ScriptError> {
    let content = std::fs::read_to_string(path)?;
    let actions = parse_script(&content)?;
    info!(path = %path.display(), actions = actions.len(), "Loaded script");
    Ok(actions)
}

/// Apply every action in order.
pub fn replay(session: &mut Session, actions: &[CartAction]) -> ReplayReport {
    let mut applied = 0;
    let mut errors = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        match action.apply(session) {
            Ok(()) => applied += 1,
            Err(e) => {
                warn!(index, error = %e, "Action failed");
                errors.push(ActionFailure {
                    index,
                    message: e.to_string(),
                });
            }
        }
    }

    ReplayReport {
        applied,
        errors,
        summary: session.summary(),
    }
}
