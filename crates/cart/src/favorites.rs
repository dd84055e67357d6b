//! Favorite products.

use greenbasket_core::ProductId;

/// Ordered set of favorite product IDs.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<ProductId>,
}

impl Favorites {
    /// Create an empty favorites list.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add or remove a product. Returns true if it is a favorite afterwards.
    pub fn toggle(&mut self, product_id: &ProductId) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| id == product_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(product_id.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.ids.contains(product_id)
    }

    /// Favorites in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
