//! Pricing

use rust_decimal::Decimal;

use crate::cart::CartLineItem;

/// Derived totals over a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line subtotals.
    pub total_price: Decimal,

    /// Sum of line quantities.
    pub item_count: u64,
}

/// Calculates the derived totals of a set of line items.
///
/// This is the single home of the totals invariant:
/// `total_price = Σ(unit price × quantity)` and `item_count = Σ(quantity)`.
pub fn totals<'a>(lines: impl IntoIterator<Item = &'a CartLineItem>) -> Totals {
    lines.into_iter().fold(Totals::default(), |acc, line| Totals {
        total_price: acc.total_price + line.subtotal(),
        item_count: acc.item_count + u64::from(line.quantity),
    })
}
