//! Integration tests for Green Basket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenbasket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart invariants exercised through a full session
//! - `session_replay` - Scripted sessions loaded from `fixtures/`
//! - `catalog_file` - Catalog files loaded from disk
//!
//! This crate only holds shared helpers for the tests under `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use greenbasket_cart::{Catalog, GreenbasketConfig, Session};
use rust_decimal::Decimal;

/// Start a session over the built-in catalog with default configuration.
///
/// # Panics
///
/// Panics if the built-in catalog is invalid.
#[must_use]
pub fn builtin_session() -> Session {
    let catalog = Catalog::builtin().expect("built-in catalog should load");
    Session::start(Arc::new(catalog), &GreenbasketConfig::default())
}

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics if `s` is not a decimal.
#[must_use]
pub fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// Path to a file under `fixtures/`.
#[must_use]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}
