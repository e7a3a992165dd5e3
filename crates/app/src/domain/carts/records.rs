//! Cart wire records.

use bazaar::{cart::CartLineItem, products::Product};
use serde::{Deserialize, Serialize};

/// Remote representation of one cart line: the embedded product snapshot
/// plus its quantity, stored under the product identifier as the document
/// id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CartItemRecord {
    pub(crate) product: Product,
    pub(crate) quantity: u32,
}

impl From<&CartLineItem> for CartItemRecord {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product: line.product.clone(),
            quantity: line.quantity,
        }
    }
}

impl From<CartItemRecord> for CartLineItem {
    fn from(record: CartItemRecord) -> Self {
        Self::new(record.product, record.quantity)
    }
}
