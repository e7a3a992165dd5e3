//! Products

pub mod catalog;
pub mod errors;
pub mod service;

pub use catalog::{Catalog, CatalogClient, CatalogConfig, CatalogError};
pub use errors::ProductsServiceError;
pub use service::{CatalogProductsService, ProductsService};
