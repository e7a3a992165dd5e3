//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, IdentityClient, RemoteAuthService, Session},
    config::AppConfig,
    domain::{
        carts::CartStore,
        checkout::CheckoutFlow,
        orders::{OrdersService, RemoteOrdersService},
        products::{CatalogClient, CatalogProductsService, ProductsService},
        profiles::{RemoteUserProfilesService, UserProfilesService},
    },
    store::{DocumentStore, HttpDocumentStore},
};

/// Application context.
///
/// Every service is wired to explicitly constructed remote clients passed
/// in at construction time; there is no ambient global state.
#[derive(Clone)]
pub struct AppContext {
    /// Current session identity.
    pub session: Arc<Session>,

    /// Registration, login, logout.
    pub auth: Arc<dyn AuthService>,

    /// Catalog browsing and seeding.
    pub products: Arc<dyn ProductsService>,

    /// The session's cart store.
    pub carts: Arc<CartStore>,

    /// Order placement and history.
    pub orders: Arc<dyn OrdersService>,

    /// Profile reads and updates.
    pub profiles: Arc<dyn UserProfilesService>,

    /// Checkout orchestration.
    pub checkout: Arc<CheckoutFlow>,
}

impl AppContext {
    /// Build the application context from configuration.
    ///
    /// Must be called from within a tokio runtime: the cart store spawns
    /// its mirror worker on creation.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn DocumentStore> =
            Arc::new(HttpDocumentStore::new((&config.store).into()));
        let identity = Arc::new(IdentityClient::new((&config.identity).into()));
        let catalog = Arc::new(CatalogClient::new((&config.catalog).into()));

        let session = Arc::new(Session::new());

        let auth = Arc::new(RemoteAuthService::new(
            identity,
            store.clone(),
            session.clone(),
        ));
        let products = Arc::new(CatalogProductsService::new(catalog, store.clone()));
        let carts = Arc::new(CartStore::new(store.clone(), session.clone()));
        let orders: Arc<dyn OrdersService> =
            Arc::new(RemoteOrdersService::new(store.clone(), session.clone()));
        let profiles = Arc::new(RemoteUserProfilesService::new(store, session.clone()));
        let checkout = Arc::new(CheckoutFlow::new(carts.clone(), orders.clone()));

        Self {
            session,
            auth,
            products,
            carts,
            orders,
            profiles,
            checkout,
        }
    }
}
