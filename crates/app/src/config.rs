//! Application configuration.

use std::time::Duration;

use clap::Args;

use crate::{auth::IdentityConfig, domain::products::CatalogConfig, store::HttpDocumentStoreConfig};

/// Storefront application configuration, from CLI flags with environment
/// fallbacks.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Document store connection settings.
    #[command(flatten)]
    pub store: StoreSettings,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentitySettings,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogSettings,
}

/// Document store connection settings.
#[derive(Debug, Args)]
pub struct StoreSettings {
    /// Document store address.
    #[arg(long = "store-addr", env = "BAZAAR_STORE_ADDR", default_value = "http://localhost:8900")]
    pub addr: String,

    /// Document store API key.
    #[arg(long = "store-api-key", env = "BAZAAR_STORE_API_KEY", default_value = "")]
    pub api_key: String,

    /// Poll interval for change subscriptions, in milliseconds.
    #[arg(
        long = "store-poll-interval-ms",
        env = "BAZAAR_STORE_POLL_INTERVAL_MS",
        default_value_t = 2_000
    )]
    pub poll_interval_ms: u64,
}

impl From<&StoreSettings> for HttpDocumentStoreConfig {
    fn from(settings: &StoreSettings) -> Self {
        Self {
            addr: settings.addr.clone(),
            api_key: settings.api_key.clone(),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct IdentitySettings {
    /// Identity provider address.
    #[arg(long = "identity-addr", env = "BAZAAR_IDENTITY_ADDR", default_value = "http://localhost:9099")]
    pub addr: String,

    /// Identity provider API key.
    #[arg(long = "identity-api-key", env = "BAZAAR_IDENTITY_API_KEY", default_value = "")]
    pub api_key: String,
}

impl From<&IdentitySettings> for IdentityConfig {
    fn from(settings: &IdentitySettings) -> Self {
        Self {
            addr: settings.addr.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

/// Product catalog settings.
#[derive(Debug, Args)]
pub struct CatalogSettings {
    /// Catalog base URL.
    #[arg(long = "catalog-url", env = "BAZAAR_CATALOG_URL", default_value = "https://fakestoreapi.com")]
    pub base_url: String,
}

impl From<&CatalogSettings> for CatalogConfig {
    fn from(settings: &CatalogSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
        }
    }
}
