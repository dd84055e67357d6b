//! Green Basket Core - Shared types library.
//!
//! This crate provides the value types used across all Green Basket components:
//! - `cart` - Catalog, cart store, favorites and session state
//! - `cli` - Command-line tools for browsing the catalog and replaying sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no global state. Prices and
//! quantities are decimal values so repeated half-kilo steps never drift.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
