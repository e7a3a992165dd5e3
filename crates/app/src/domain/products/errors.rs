//! Products service errors.

use thiserror::Error;

use crate::{domain::products::catalog::CatalogError, store::StoreError};

/// Errors surfaced by [`crate::domain::products::ProductsService`].
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// Catalog fetch failed.
    #[error("catalog error")]
    Catalog(#[from] CatalogError),

    /// Document store error.
    #[error("storage error")]
    Store(#[from] StoreError),
}
