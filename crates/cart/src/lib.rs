//! Green Basket Cart - Catalog, cart store and shopping session state.
//!
//! # Architecture
//!
//! - [`Catalog`] is read-only product data, loaded once and shared via `Arc`
//! - [`CartStore`] owns the cart's line items and computes totals
//! - [`Session`] is the single owner of the cart, pending selections and
//!   favorites for one shopper; every screen goes through it
//! - [`views`] turn session state into formatted display snapshots
//!
//! Everything is in memory and synchronous. Nothing is persisted.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use greenbasket_cart::{Catalog, GreenbasketConfig, Session};
//! use greenbasket_core::ProductId;
//! use rust_decimal::Decimal;
//!
//! let config = GreenbasketConfig::default();
//! let catalog = Arc::new(Catalog::builtin().unwrap());
//! let mut session = Session::start(catalog, &config);
//!
//! let tomatoes = ProductId::new("7");
//! session.adjust_cart(&tomatoes, Decimal::from(2)).unwrap();
//! assert_eq!(session.cart().total_price(), Decimal::from(80));
//!
//! session.adjust_cart(&tomatoes, Decimal::from(-2)).unwrap();
//! assert!(session.cart().is_empty());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod line_item;
pub mod script;
pub mod selection;
pub mod session;
pub mod store;
pub mod views;

pub use catalog::{Catalog, Category, Product};
pub use config::{ConfigError, GreenbasketConfig, LogFormat};
pub use error::{CatalogError, ScriptError, SessionError};
pub use favorites::Favorites;
pub use line_item::{LineItem, ProductMeta};
pub use script::{CartAction, ReplayReport, replay};
pub use selection::QuantitySelector;
pub use session::{CartSummary, Session};
pub use store::{CartStore, QuantityChange};
