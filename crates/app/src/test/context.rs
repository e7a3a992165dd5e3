//! Test context for service-level tests.

use std::sync::Arc;

use crate::{
    auth::Session,
    domain::{carts::CartStore, orders::RemoteOrdersService},
    test::store::MemoryDocumentStore,
};

/// Cart and orders services wired over one in-memory store and session.
pub(crate) struct TestContext {
    pub(crate) store: MemoryDocumentStore,
    pub(crate) session: Arc<Session>,
    pub(crate) carts: Arc<CartStore>,
    pub(crate) orders: Arc<RemoteOrdersService>,
}

impl TestContext {
    /// Build a fresh context. Must run inside a tokio runtime: the cart
    /// store spawns its mirror worker on creation.
    pub(crate) fn new() -> Self {
        let store = MemoryDocumentStore::default();
        let session = Arc::new(Session::new());

        let carts = Arc::new(CartStore::new(
            Arc::new(store.clone()),
            session.clone(),
        ));
        let orders = Arc::new(RemoteOrdersService::new(
            Arc::new(store.clone()),
            session.clone(),
        ));

        Self {
            store,
            session,
            carts,
            orders,
        }
    }
}
