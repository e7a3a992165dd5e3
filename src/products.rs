//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the product catalog, unique per product.
pub type ProductId = u64;

/// Product
///
/// A snapshot of one catalog product. Immutable once fetched; the catalog
/// is the sole writer. `stock` and `store_name` default when absent, since
/// the public catalog listing omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Unit price. Non-negative.
    pub price: Decimal,

    /// Long-form description.
    #[serde(default)]
    pub description: String,

    /// Catalog category.
    #[serde(default)]
    pub category: String,

    /// Image reference.
    #[serde(default)]
    pub image: String,

    /// Available stock quantity.
    #[serde(default)]
    pub stock: u32,

    /// Name of the owning store.
    #[serde(default)]
    pub store_name: String,
}
