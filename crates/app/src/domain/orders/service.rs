//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use bazaar::{cart::CartLineItem, orders::OrderStatus};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    auth::Session,
    store::{Document, DocumentStore, FieldFilter, StoreError},
};

use super::{errors::OrdersServiceError, models::Order};

/// Flat collection holding order records.
pub(crate) const ORDERS_COLLECTION: &str = "orders";

/// Live sequence of order-history snapshots.
///
/// The channel closes after delivering the first error; restarting is the
/// subscriber's responsibility.
pub type OrderSubscription = mpsc::Receiver<Result<Vec<Order>, OrdersServiceError>>;

/// Order placement and history.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist an immutable `pending` order for the given cart snapshot,
    /// stamped with the current cart owner and creation time.
    ///
    /// A failed remote write surfaces as
    /// [`OrdersServiceError::PlacementFailed`] with nothing persisted. No
    /// cart state is touched either way: clearing the cart after a
    /// successful placement is the caller's responsibility.
    async fn place_order(
        &self,
        items: Vec<CartLineItem>,
        total_price: Decimal,
    ) -> Result<Order, OrdersServiceError>;

    /// Subscribe to the current cart owner's order history.
    ///
    /// Emits the full current set of orders as a snapshot immediately and
    /// again after every remote change; terminates on the first remote
    /// error without retrying.
    fn subscribe(&self) -> OrderSubscription;
}

/// Orders service backed by the remote document store.
pub struct RemoteOrdersService {
    store: Arc<dyn DocumentStore>,
    session: Arc<Session>,
}

impl RemoteOrdersService {
    /// Create the service over its collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, session: Arc<Session>) -> Self {
        Self { store, session }
    }
}

#[async_trait]
impl OrdersService for RemoteOrdersService {
    async fn place_order(
        &self,
        items: Vec<CartLineItem>,
        total_price: Decimal,
    ) -> Result<Order, OrdersServiceError> {
        let order = Order {
            items,
            total_price,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
            owner: self.session.cart_owner(),
        };

        let body = serde_json::to_value(&order)
            .map_err(StoreError::from)
            .map_err(OrdersServiceError::PlacementFailed)?;

        let id = self
            .store
            .add(ORDERS_COLLECTION, body)
            .await
            .map_err(OrdersServiceError::PlacementFailed)?;

        tracing::debug!(%id, owner = %order.owner, "order placed");

        Ok(order)
    }

    fn subscribe(&self) -> OrderSubscription {
        let filter = FieldFilter::new("owner", Value::from(self.session.cart_owner()));
        let mut documents = self.store.subscribe(ORDERS_COLLECTION, Some(filter));
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            while let Some(snapshot) = documents.recv().await {
                let message = match snapshot {
                    Ok(documents) => Ok(decode_orders(documents)),
                    Err(error) => Err(OrdersServiceError::from(error)),
                };

                let closing = message.is_err();

                if tx.send(message).await.is_err() {
                    return;
                }

                if closing {
                    return;
                }
            }
        });

        rx
    }
}

fn decode_orders(documents: Vec<Document>) -> Vec<Order> {
    documents
        .into_iter()
        .filter_map(|document| match serde_json::from_value(document.body) {
            Ok(order) => Some(order),
            Err(error) => {
                tracing::warn!(%error, id = %document.id, "skipping undecodable order record");
                None
            }
        })
        .collect()
}
