//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar::products::{Product, ProductId};
use mockall::automock;

use crate::store::DocumentStore;

use super::{catalog::Catalog, errors::ProductsServiceError};

/// Collection holding seeded product documents, keyed by product id.
pub(crate) const PRODUCTS_COLLECTION: &str = "products";

/// Catalog browsing and product seeding.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Fetch the catalog product listing.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Fetch a single catalog product.
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductsServiceError>;

    /// Copy the catalog into the `products` collection, overriding each
    /// product's stock with `stock`.
    ///
    /// Individual write failures are logged and skipped; returns the number
    /// of products actually written.
    async fn seed_products(&self, stock: u32) -> Result<usize, ProductsServiceError>;
}

/// Products service backed by the remote catalog and document store.
pub struct CatalogProductsService {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn DocumentStore>,
}

impl CatalogProductsService {
    /// Create the service over its collaborators.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, store: Arc<dyn DocumentStore>) -> Self {
        Self { catalog, store }
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.catalog.list_products().await?)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductsServiceError> {
        Ok(self.catalog.get_product(id).await?)
    }

    async fn seed_products(&self, stock: u32) -> Result<usize, ProductsServiceError> {
        let products = self.catalog.list_products().await?;

        let mut written = 0;

        for product in products {
            let product = Product { stock, ..product };

            let body = match serde_json::to_value(&product) {
                Ok(body) => body,
                Err(error) => {
                    tracing::warn!(%error, product = product.id, "failed to encode product");
                    continue;
                }
            };

            match self
                .store
                .set(PRODUCTS_COLLECTION, &product.id.to_string(), body)
                .await
            {
                Ok(()) => written += 1,
                Err(error) => {
                    tracing::warn!(%error, product = product.id, "failed to seed product");
                }
            }
        }

        Ok(written)
    }
}
