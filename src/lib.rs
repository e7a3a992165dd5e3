//! Bazaar
//!
//! Bazaar is a storefront cart and order engine: an authoritative in-process
//! shopping cart with derived totals, plus the shared product and order
//! vocabulary used by the application services in `crates/app`.

pub mod cart;
pub mod currency;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
