//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLineItem, QuantityChange},
    currency::format_usd,
    orders::{OrderStatus, UnknownOrderStatus},
    pricing::{Totals, totals},
    products::{Product, ProductId},
};
