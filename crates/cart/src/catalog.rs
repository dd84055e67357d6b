//! Read-only product catalog.
//!
//! The catalog is the source of product identity, display metadata and unit
//! price. It is loaded once (from the built-in YAML or a file), validated, and
//! then shared immutably by every session.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use greenbasket_core::{CategoryId, Price, ProductId};

use crate::error::CatalogError;
use crate::line_item::ProductMeta;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// A product category (home screen tile and category screen).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// URL-style slug, e.g. `non-seasonal`.
    pub id: CategoryId,
    /// Short name shown on the home screen tile.
    pub name: String,
    /// Heading shown on the category screen.
    pub title: String,
}

/// A product sold by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit the price applies to (e.g. `kg`).
    pub unit: String,
    /// Price per unit.
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub category: CategoryId,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Metadata handed to the cart when this product is first added.
    #[must_use]
    pub fn meta(&self) -> ProductMeta {
        ProductMeta::new(self.name.clone(), self.unit.clone(), self.price)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Validated catalog with ID lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// The catalog bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, duplicate product or category IDs,
    /// or a product in an unknown category.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.categories, file.products)
    }

    /// Build a catalog from categories and products.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate IDs or a product in an unknown category.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !category_ids.insert(category.id.clone()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if !category_ids.contains(&product.category) {
                return Err(CatalogError::DanglingCategory {
                    product: product.id.clone(),
                    category: product.category.clone(),
                });
            }
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self {
            categories,
            products,
            by_id,
        })
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCategory`] if no category has this ID.
    pub fn category(&self, id: &CategoryId) -> Result<&Category, CatalogError> {
        self.categories
            .iter()
            .find(|category| &category.id == id)
            .ok_or_else(|| CatalogError::UnknownCategory(id.clone()))
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] if no product has this ID.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.by_id
            .get(id)
            .and_then(|&index| self.products.get(index))
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }

    /// Products in a category, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCategory`] if no category has this ID.
    pub fn products_in(&self, id: &CategoryId) -> Result<Vec<&Product>, CatalogError> {
        let category = self.category(id)?;
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category.id)
            .collect())
    }

    /// Number of products in a category (zero for unknown categories).
    #[must_use]
    pub fn count_in(&self, id: &CategoryId) -> usize {
        self.products
            .iter()
            .filter(|product| &product.category == id)
            .count()
    }

    /// Case-insensitive product name search. A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect()
    }
}
