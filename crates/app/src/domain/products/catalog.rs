//! Product catalog client.

use async_trait::async_trait;
use bazaar::products::{Product, ProductId};
use mockall::automock;
use reqwest::Client;
use thiserror::Error;

/// Configuration for the remote product catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog base URL, e.g. `"https://fakestoreapi.com"`.
    pub base_url: String,
}

/// Errors that can occur when fetching from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog returned a non-2xx response.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}

/// Read-only access to the remote product catalog.
///
/// The catalog is the sole writer of product data; nothing here mutates it,
/// and nothing is retried.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the full product listing.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch a single product by identifier.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

/// HTTP client for the remote product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    config: CatalogConfig,
    http: Client,
}

impl CatalogClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, CatalogError> {
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "request to {url} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch(format!("{}/products", self.config.base_url)).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(format!("{}/products/{id}", self.config.base_url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn catalog_listing_payload_deserializes() -> TestResult {
        let payload = r#"[
            {
                "id": 1,
                "title": "Fjallraven Backpack",
                "price": 109.95,
                "description": "Your perfect pack for everyday use",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/81fPKd-2AYL.jpg",
                "rating": { "rate": 3.9, "count": 120 }
            },
            {
                "id": 2,
                "title": "Mens Casual T-Shirt",
                "price": 22.3,
                "description": "Slim-fitting style",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/71-3HjGNDUL.jpg"
            }
        ]"#;

        let products: Vec<Product> = serde_json::from_str(payload)?;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].price, "109.95".parse::<Decimal>()?);
        assert_eq!(products[1].stock, 0, "listing omits stock");

        Ok(())
    }
}
