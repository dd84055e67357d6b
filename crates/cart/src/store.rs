//! The cart store.
//!
//! [`CartStore`] owns the line items of the current session's cart. Every
//! mutation keeps two invariants:
//!
//! - a product ID appears at most once (adding more of a product grows its
//!   existing line)
//! - no line has a zero quantity (a line that reaches zero is removed)
//!
//! Quantities change by signed decimal deltas and clamp at zero, so pressing
//! "minus" past empty is never an error. Totals are recomputed on every call.
//!
//! A change whose quantity, line total or cart totals would not fit in a
//! [`Decimal`] is rejected and leaves the cart as it was, so the totals of an
//! accepted cart are always representable.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use greenbasket_core::{ProductId, Quantity};

use crate::line_item::{LineItem, ProductMeta};

/// What a [`CartStore::set_quantity`] call did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// A new line was created with this quantity.
    Created(Quantity),
    /// An existing line now has this quantity.
    Updated(Quantity),
    /// The line reached zero and was removed.
    Removed,
    /// Nothing changed (absent product with a non-positive delta, or zero delta).
    Unchanged,
    /// The change would overflow the line or the cart totals; nothing changed.
    Rejected,
}

/// In-memory cart line items, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adjust the quantity of `product_id` by `delta`.
    ///
    /// If the product is not in the cart and `delta` is positive, a line is
    /// created from `meta`. For a product already in the cart `meta` is
    /// ignored. The resulting quantity clamps at zero and a line at zero is
    /// removed. A change that would overflow the totals returns
    /// [`QuantityChange::Rejected`] and leaves the cart untouched.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        meta: &ProductMeta,
        delta: Decimal,
    ) -> QuantityChange {
        let Some(pos) = self.position(product_id) else {
            if delta <= Decimal::ZERO {
                return QuantityChange::Unchanged;
            }
            let Ok(quantity) = Quantity::new(delta) else {
                return QuantityChange::Unchanged;
            };
            let item = LineItem::new(product_id.clone(), meta, quantity);
            if !self.totals_fit(None, &item) {
                warn!(product_id = %product_id, delta = %delta, "Cart change rejected: overflow");
                return QuantityChange::Rejected;
            }
            self.items.push(item);
            debug!(product_id = %product_id, quantity = %quantity, "Cart line created");
            return QuantityChange::Created(quantity);
        };

        if delta.is_zero() {
            return QuantityChange::Unchanged;
        }

        let Some(current) = self.items.get(pos) else {
            return QuantityChange::Unchanged;
        };
        let Ok(quantity) = current.quantity.adjusted_by(delta) else {
            warn!(product_id = %product_id, delta = %delta, "Cart change rejected: overflow");
            return QuantityChange::Rejected;
        };

        if quantity.is_zero() {
            self.items.remove(pos);
            debug!(product_id = %product_id, "Cart line removed at zero quantity");
            return QuantityChange::Removed;
        }

        let updated = LineItem {
            quantity,
            ..current.clone()
        };
        if !self.totals_fit(Some(pos), &updated) {
            warn!(product_id = %product_id, delta = %delta, "Cart change rejected: overflow");
            return QuantityChange::Rejected;
        }
        if let Some(item) = self.items.get_mut(pos) {
            *item = updated;
        }
        debug!(product_id = %product_id, quantity = %quantity, "Cart line updated");
        QuantityChange::Updated(quantity)
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Option<LineItem> {
        let pos = self.position(product_id)?;
        debug!(product_id = %product_id, "Cart line removed");
        Some(self.items.remove(pos))
    }

    /// Snapshot of all lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Look up a single line.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == product_id)
    }

    /// Quantity of a product in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Quantity {
        self.get(product_id).map_or(Quantity::ZERO, |item| item.quantity)
    }

    /// Sum of `unit_price * quantity` over every line.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        // set_quantity never admits a cart whose total overflows.
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()))
            .unwrap_or(Decimal::MAX)
    }

    /// Sum of the quantities of every line (not the number of lines).
    #[must_use]
    pub fn total_item_count(&self) -> Quantity {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == product_id)
    }

    /// Whether the cart totals stay representable with `candidate` in place
    /// of the line at `replace` (or appended when `replace` is `None`).
    fn totals_fit(&self, replace: Option<usize>, candidate: &LineItem) -> bool {
        let lines = self
            .items
            .iter()
            .enumerate()
            .filter(|&(index, _)| Some(index) != replace)
            .map(|(_, item)| item)
            .chain(std::iter::once(candidate));

        let mut price = Decimal::ZERO;
        let mut count = Decimal::ZERO;
        for item in lines {
            let next = item
                .unit_price
                .total_for(item.quantity)
                .and_then(|line| price.checked_add(line))
                .zip(count.checked_add(item.quantity.value()));
            let Some((next_price, next_count)) = next else {
                return false;
            };
            price = next_price;
            count = next_count;
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenbasket_core::Price;

    use super::*;

    fn tomatoes() -> (ProductId, ProductMeta) {
        (
            ProductId::new("1"),
            ProductMeta::new("Fresh Tomatoes", "kg", Price::from_units(40)),
        )
    }

    fn spinach() -> (ProductId, ProductMeta) {
        (
            ProductId::new("2"),
            ProductMeta::new("Green Spinach", "kg", Price::from_units(25)),
        )
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_two_kilos() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();

        let change = cart.set_quantity(&id, &meta, dec("2"));

        assert_eq!(change, QuantityChange::Created(Quantity::parse("2").unwrap()));
        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].quantity, Quantity::parse("2").unwrap());
        assert_eq!(cart.total_price(), dec("80"));
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("2"));

        let change = cart.set_quantity(&id, &meta, dec("-2"));

        assert_eq!(change, QuantityChange::Removed);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_half_steps_return_to_exact_zero() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();

        cart.set_quantity(&id, &meta, dec("0.5"));
        cart.set_quantity(&id, &meta, dec("0.5"));
        cart.set_quantity(&id, &meta, dec("-1"));

        assert!(cart.get(&id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_over_decrement_clamps_silently() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("0.5"));

        let change = cart.set_quantity(&id, &meta, dec("-5"));

        assert_eq!(change, QuantityChange::Removed);
        assert_eq!(cart.quantity_of(&id), Quantity::ZERO);
    }

    #[test]
    fn test_negative_delta_on_absent_product_is_noop() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();

        let change = cart.set_quantity(&id, &meta, dec("-0.5"));

        assert_eq!(change, QuantityChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        assert_eq!(cart.set_quantity(&id, &meta, Decimal::ZERO), QuantityChange::Unchanged);
        assert!(cart.is_empty());

        cart.set_quantity(&id, &meta, dec("1"));
        assert_eq!(cart.set_quantity(&id, &meta, Decimal::ZERO), QuantityChange::Unchanged);
        assert_eq!(cart.quantity_of(&id), Quantity::parse("1").unwrap());
    }

    #[test]
    fn test_adding_existing_product_merges() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("1"));

        let change = cart.set_quantity(&id, &meta, dec("0.5"));

        assert_eq!(change, QuantityChange::Updated(Quantity::parse("1.5").unwrap()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_existing_line_keeps_original_metadata() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("1"));

        let repriced = ProductMeta::new("Cheap Tomatoes", "kg", Price::from_units(1));
        cart.set_quantity(&id, &repriced, dec("1"));

        let item = cart.get(&id).unwrap();
        assert_eq!(item.name, "Fresh Tomatoes");
        assert_eq!(item.unit_price, Price::from_units(40));
        assert_eq!(cart.total_price(), dec("80"));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = CartStore::new();
        let (t_id, t_meta) = tomatoes();
        let (s_id, s_meta) = spinach();
        cart.set_quantity(&s_id, &s_meta, dec("1"));
        cart.set_quantity(&t_id, &t_meta, dec("1"));
        cart.set_quantity(&s_id, &s_meta, dec("1"));

        let ids: Vec<_> = cart.items().into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![s_id, t_id]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("1"));

        let mut snapshot = cart.items();
        snapshot[0].quantity = Quantity::parse("99").unwrap();
        snapshot.clear();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&id), Quantity::parse("1").unwrap());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("1.5"));

        let removed = cart.remove_item(&id).unwrap();

        assert_eq!(removed.quantity, Quantity::parse("1.5").unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = CartStore::new();
        assert!(cart.remove_item(&ProductId::new("999")).is_none());
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_total_item_count_sums_quantities() {
        let mut cart = CartStore::new();
        let (t_id, t_meta) = tomatoes();
        let (s_id, s_meta) = spinach();
        cart.set_quantity(&t_id, &t_meta, dec("0.5"));
        cart.set_quantity(&s_id, &s_meta, dec("0.5"));

        assert_eq!(cart.total_item_count(), Quantity::parse("1.0").unwrap());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let cart = CartStore::new();
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert_eq!(cart.total_item_count(), Quantity::ZERO);
    }

    #[test]
    fn test_total_matches_snapshot_and_is_stable() {
        let mut cart = CartStore::new();
        let (t_id, t_meta) = tomatoes();
        let (s_id, s_meta) = spinach();
        cart.set_quantity(&t_id, &t_meta, dec("2"));
        cart.set_quantity(&s_id, &s_meta, dec("1.5"));
        cart.set_quantity(&t_id, &t_meta, dec("-0.5"));

        let from_snapshot: Decimal = cart.items().iter().map(LineItem::line_total).sum();
        assert_eq!(cart.total_price(), from_snapshot);
        assert_eq!(cart.total_price(), dec("97.5"));
        assert_eq!(cart.total_price(), cart.total_price());
        assert_eq!(cart.items(), cart.items());
    }

    #[test]
    fn test_no_line_ever_non_positive() {
        let mut cart = CartStore::new();
        let (t_id, t_meta) = tomatoes();
        let (s_id, s_meta) = spinach();
        let steps = ["0.5", "-1", "1.5", "-0.5", "0.5", "-3", "2", "-0.5", "-0.5"];

        for (i, step) in steps.iter().enumerate() {
            let (id, meta) = if i % 2 == 0 { (&t_id, &t_meta) } else { (&s_id, &s_meta) };
            cart.set_quantity(id, meta, dec(step));
            assert!(cart.items().iter().all(|item| item.quantity > Quantity::ZERO));
        }
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut cart = CartStore::new();
        let (id, meta) = (
            ProductId::new("3"),
            ProductMeta::new("Free Sample", "piece", Price::ZERO),
        );
        cart.set_quantity(&id, &meta, Decimal::MAX);

        let change = cart.set_quantity(&id, &meta, Decimal::MAX);

        assert_eq!(change, QuantityChange::Rejected);
        assert_eq!(cart.quantity_of(&id).value(), Decimal::MAX);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_line_total_overflow_is_rejected() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();

        assert_eq!(cart.set_quantity(&id, &meta, Decimal::MAX), QuantityChange::Rejected);
        assert!(cart.is_empty());

        let huge = dec("1000000000000000000000000000");
        assert!(matches!(cart.set_quantity(&id, &meta, huge), QuantityChange::Created(_)));
        assert_eq!(cart.set_quantity(&id, &meta, huge), QuantityChange::Rejected);
        assert_eq!(cart.quantity_of(&id).value(), huge);
        assert_eq!(cart.total_price(), dec("40000000000000000000000000000"));
    }

    #[test]
    fn test_cart_total_overflow_is_rejected() {
        let mut cart = CartStore::new();
        let (t_id, t_meta) = tomatoes();
        let (s_id, s_meta) = spinach();
        cart.set_quantity(&t_id, &t_meta, dec("1000000000000000000000000000"));

        let change = cart.set_quantity(&s_id, &s_meta, dec("1600000000000000000000000000"));

        assert_eq!(change, QuantityChange::Rejected);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), dec("40000000000000000000000000000"));
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        let (id, meta) = tomatoes();
        cart.set_quantity(&id, &meta, dec("1"));
        cart.clear();
        assert!(cart.is_empty());
    }
}
