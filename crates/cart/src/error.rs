//! Error types for catalog loading, session operations and script replay.
//!
//! The cart store itself never fails; errors only come from looking things up
//! in the catalog, from reading input files, and from shopper actions the
//! storefront refuses (adding an out-of-stock product, adding an empty
//! selection, or a quantity too large to total).

use thiserror::Error;

use greenbasket_core::{CategoryId, ProductId};

/// Catalog loading and lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog YAML is malformed.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two products share an ID.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Two categories share an ID.
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    /// A product references a category that does not exist.
    #[error("Product {product} references unknown category {category}")]
    DanglingCategory {
        product: ProductId,
        category: CategoryId,
    },

    /// No category with this ID.
    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),

    /// No product with this ID.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),
}

/// Errors from shopper actions on a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Product cannot be added because it is out of stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    /// "Add to cart" was pressed with no quantity selected.
    #[error("Select a quantity before adding {0} to the cart")]
    NothingSelected(ProductId),

    /// The quantity or the resulting totals are too large to represent.
    #[error("Quantity too large for product {0}")]
    Overflow(ProductId),
}

/// Errors loading a replay script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script file could not be read.
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// Script YAML is malformed.
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
