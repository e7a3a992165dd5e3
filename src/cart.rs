//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{self, Totals},
    products::{Product, ProductId},
};

/// One product-plus-quantity entry within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Embedded snapshot of the product at the time it was added.
    pub product: Product,

    /// Units of the product in the cart. Always positive.
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a line item for `quantity` units of `product`.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Line subtotal: unit price × quantity.
    ///
    /// Always derived from its inputs, never stored.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// The quantity was zero, so the line was removed.
    Removed(CartLineItem),

    /// The line's quantity was replaced.
    Replaced(CartLineItem),

    /// No line exists for the product identifier.
    Absent,
}

/// Cart
///
/// Line items keyed by product identifier, at most one line per product.
/// The derived totals are recomputed before every mutating call returns,
/// so readers always observe `total_price == Σ(price × qty)` and
/// `item_count == Σ(qty)`.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: FxHashMap<ProductId, CartLineItem>,
    totals: Totals,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `quantity` units of `product` into the cart.
    ///
    /// An existing line for the same product grows by `quantity` (merge
    /// semantics, not overwrite); otherwise a new line is inserted. Returns
    /// a snapshot of the post-merge line, or `None` for a zero quantity,
    /// which is a no-op: line quantities stay positive.
    pub fn add(&mut self, product: Product, quantity: u32) -> Option<CartLineItem> {
        if quantity == 0 {
            return None;
        }

        let line = self
            .lines
            .entry(product.id)
            .and_modify(|line| line.quantity += quantity)
            .or_insert_with(|| CartLineItem::new(product, quantity))
            .clone();

        self.recompute();

        Some(line)
    }

    /// Remove the line for `product_id`, returning it.
    ///
    /// A no-op returning `None` when no such line exists.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLineItem> {
        let removed = self.lines.remove(&product_id);

        if removed.is_some() {
            self.recompute();
        }

        removed
    }

    /// Replace the quantity of the line for `product_id` (no merge).
    ///
    /// A zero quantity behaves exactly like [`Cart::remove`].
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> QuantityChange {
        if quantity == 0 {
            return match self.remove(product_id) {
                Some(line) => QuantityChange::Removed(line),
                None => QuantityChange::Absent,
            };
        }

        let Some(line) = self.lines.get_mut(&product_id) else {
            return QuantityChange::Absent;
        };

        line.quantity = quantity;
        let line = line.clone();

        self.recompute();

        QuantityChange::Replaced(line)
    }

    /// Remove every line; totals drop to zero.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Replace the whole cart with `lines`, keyed by product identifier.
    ///
    /// Later duplicates of the same product overwrite earlier ones.
    pub fn replace_lines(&mut self, lines: impl IntoIterator<Item = CartLineItem>) {
        self.lines = lines
            .into_iter()
            .map(|line| (line.product.id, line))
            .collect();

        self.recompute();
    }

    /// The line for `product_id`, when present.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.get(&product_id)
    }

    /// Snapshot of the current line items, in product-identifier order.
    ///
    /// Line order carries no meaning within a cart; sorting only makes
    /// snapshots deterministic.
    pub fn line_items(&self) -> Vec<CartLineItem> {
        let mut lines: Vec<CartLineItem> = self.lines.values().cloned().collect();
        lines.sort_by_key(|line| line.product.id);
        lines
    }

    /// Derived total price: `Σ(unit price × quantity)`.
    pub fn total_price(&self) -> Decimal {
        self.totals.total_price
    }

    /// Derived item count: `Σ(quantity)`.
    pub fn item_count(&self) -> u64 {
        self.totals.item_count
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn recompute(&mut self) {
        self.totals = pricing::totals(self.lines.values());
    }
}
