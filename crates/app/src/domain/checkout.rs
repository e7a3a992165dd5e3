//! Checkout flow.

use std::sync::Arc;

use crate::domain::{
    carts::CartStore,
    orders::{Order, OrdersService, OrdersServiceError},
};

/// Coordinates order placement with cart clearing.
///
/// Placement and clearing are two separate steps against two different
/// collections: a crash between them leaves a placed order alongside an
/// uncleared cart, so a re-driven checkout can duplicate the order. The
/// backing store offers no cross-collection transaction to close that
/// window, so it is documented here instead of hidden.
pub struct CheckoutFlow {
    cart: Arc<CartStore>,
    orders: Arc<dyn OrdersService>,
}

impl CheckoutFlow {
    /// Create the flow over the session's cart store and orders service.
    #[must_use]
    pub fn new(cart: Arc<CartStore>, orders: Arc<dyn OrdersService>) -> Self {
        Self { cart, orders }
    }

    /// Place an order for the cart's current contents.
    ///
    /// The cart is cleared only after the order write is acknowledged, and
    /// left untouched when placement fails.
    pub async fn place_order(&self) -> Result<Order, OrdersServiceError> {
        let items = self.cart.line_items();
        let total_price = self.cart.total_price();

        let order = self.orders.place_order(items, total_price).await?;

        self.cart.clear_cart();

        Ok(order)
    }
}
