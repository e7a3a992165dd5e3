//! Cart store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bazaar::{
    cart::{Cart, CartLineItem},
    products::{Product, ProductId},
};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

use crate::{auth::Session, store::DocumentStore};

use super::{
    mirror::{self, MirrorJob},
    records::CartItemRecord,
};

/// Authoritative in-process cart, mirrored to the remote store.
///
/// Mutations update local state synchronously and enqueue the matching
/// remote write on a per-instance background queue, drained in FIFO order
/// by a worker task. Readers never wait on the mirror, and a mirror failure
/// never surfaces: the local cart is the source of truth and the remote
/// copy is eventually consistent at best. Under rapid mutation the remote
/// store sees last-write-wins per product key.
///
/// Effectively a per-session singleton: every caller goes through the same
/// interior lock, so concurrent UI entry points serialize here.
pub struct CartStore {
    cart: Mutex<Cart>,
    session: Arc<Session>,
    store: Arc<dyn DocumentStore>,
    jobs: mpsc::UnboundedSender<MirrorJob>,
}

impl CartStore {
    /// Create a cart store mirroring to `store`, keyed off `session`.
    ///
    /// Spawns the mirror worker on the current runtime.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, session: Arc<Session>) -> Self {
        let (jobs, queue) = mpsc::unbounded_channel();

        tokio::spawn(mirror::run_mirror(store.clone(), queue));

        Self {
            cart: Mutex::new(Cart::new()),
            session,
            store,
            jobs,
        }
    }

    /// Best-effort refresh of the local cart from the remote mirror.
    ///
    /// Rebuilds the cart from the owner's persisted line documents and
    /// recomputes totals. A remote read failure is logged and leaves the
    /// local cart unchanged; undecodable documents are skipped.
    pub async fn load_from_remote(&self) {
        let owner = self.session.cart_owner();

        let documents = match self.store.get_all(&mirror::cart_path(&owner)).await {
            Ok(documents) => documents,
            Err(error) => {
                tracing::warn!(%error, %owner, "failed to load cart from remote store");
                return;
            }
        };

        let lines = documents.into_iter().filter_map(|document| {
            match serde_json::from_value::<CartItemRecord>(document.body) {
                Ok(record) => Some(CartLineItem::from(record)),
                Err(error) => {
                    tracing::warn!(%error, id = %document.id, "skipping undecodable cart record");
                    None
                }
            }
        });

        self.lock().replace_lines(lines);
    }

    /// Merge `quantity` units of `product` into the cart and mirror the
    /// post-merge line to the remote store, keyed by product id so repeated
    /// adds overwrite the remote record rather than duplicate it.
    ///
    /// A zero quantity is a no-op.
    pub fn add_to_cart(&self, product: Product, quantity: u32) {
        let Some(line) = self.lock().add(product, quantity) else {
            return;
        };

        self.enqueue(MirrorJob::Upsert {
            owner: self.session.cart_owner(),
            product_id: line.product.id,
            record: CartItemRecord::from(&line),
        });
    }

    /// Remove the line for `product_id` (no-op locally when absent) and
    /// delete the corresponding remote record.
    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.lock().remove(product_id);

        self.enqueue(MirrorJob::Delete {
            owner: self.session.cart_owner(),
            product_id,
        });
    }

    /// Replace the quantity for `product_id` and mirror only the quantity
    /// field of the remote record. A zero quantity behaves exactly like
    /// [`CartStore::remove_from_cart`].
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }

        self.lock().set_quantity(product_id, quantity);

        self.enqueue(MirrorJob::SetQuantity {
            owner: self.session.cart_owner(),
            product_id,
            quantity,
        });
    }

    /// Empty the cart and batch-delete the owner's remote cart records.
    pub fn clear_cart(&self) {
        self.lock().clear();

        self.enqueue(MirrorJob::Clear {
            owner: self.session.cart_owner(),
        });
    }

    /// Snapshot of the current line items, in product-identifier order.
    pub fn line_items(&self) -> Vec<CartLineItem> {
        self.lock().line_items()
    }

    /// Derived total price.
    pub fn total_price(&self) -> Decimal {
        self.lock().total_price()
    }

    /// Derived item count.
    pub fn item_count(&self) -> u64 {
        self.lock().item_count()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Wait until every mirror operation enqueued so far has been
    /// attempted.
    ///
    /// Local reads never need this; it exists for shutdown and for tests
    /// that assert on remote state.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();

        self.enqueue(MirrorJob::Flush(ack));

        if done.await.is_err() {
            tracing::debug!("mirror worker stopped before flush completed");
        }
    }

    fn enqueue(&self, job: MirrorJob) {
        if self.jobs.send(job).is_err() {
            tracing::warn!("cart mirror worker is no longer running");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        auth::models::UserId,
        test::{context::TestContext, helpers::product},
    };

    use super::*;

    #[tokio::test]
    async fn add_to_cart_mirrors_the_post_merge_line() -> TestResult {
        let ctx = TestContext::new();
        let p1 = product(1, "9.99");

        ctx.carts.add_to_cart(p1.clone(), 2);
        ctx.carts.add_to_cart(p1, 3);
        ctx.carts.flush().await;

        let documents = ctx.store.documents("users/guest/cart");

        assert_eq!(documents.len(), 1, "repeated adds overwrite, not duplicate");
        assert_eq!(documents[0].id, "1");
        assert_eq!(documents[0].body["quantity"], json!(5));

        assert_eq!(ctx.carts.item_count(), 5);
        assert_eq!(ctx.carts.total_price(), "49.95".parse::<Decimal>()?);

        Ok(())
    }

    #[tokio::test]
    async fn remove_from_cart_deletes_the_remote_record() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "5.00"), 1);
        ctx.carts.add_to_cart(product(2, "2.00"), 1);
        ctx.carts.remove_from_cart(1);
        ctx.carts.flush().await;

        let documents = ctx.store.documents("users/guest/cart");

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "2");
        assert_eq!(ctx.carts.item_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_touches_only_the_quantity_field() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "4.00"), 4);
        ctx.carts.update_quantity(1, 2);
        ctx.carts.flush().await;

        let documents = ctx.store.documents("users/guest/cart");

        assert_eq!(documents[0].body["quantity"], json!(2));
        assert_eq!(documents[0].body["product"]["id"], json!(1));
        assert_eq!(ctx.carts.total_price(), "8.00".parse::<Decimal>()?);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_zero_removes_locally_and_remotely() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "4.00"), 4);
        ctx.carts.update_quantity(1, 0);
        ctx.carts.flush().await;

        assert!(ctx.carts.is_empty());
        assert_eq!(ctx.carts.total_price(), Decimal::ZERO);
        assert!(ctx.store.documents("users/guest/cart").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_batch_deletes_the_owner_collection() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "1.00"), 1);
        ctx.carts.add_to_cart(product(2, "2.00"), 2);
        ctx.carts.clear_cart();
        ctx.carts.flush().await;

        assert!(ctx.carts.is_empty());
        assert_eq!(ctx.carts.item_count(), 0);
        assert!(ctx.store.documents("users/guest/cart").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn load_from_remote_rebuilds_lines_and_totals() -> TestResult {
        let ctx = TestContext::new();

        ctx.store.insert(
            "users/guest/cart",
            "1",
            json!({ "product": product(1, "9.99"), "quantity": 2 }),
        );
        ctx.store.insert(
            "users/guest/cart",
            "2",
            json!({ "product": product(2, "5.00"), "quantity": 1 }),
        );
        // Undecodable record: skipped, not fatal.
        ctx.store
            .insert("users/guest/cart", "junk", json!({ "quantity": "many" }));

        ctx.carts.load_from_remote().await;

        assert_eq!(ctx.carts.line_items().len(), 2);
        assert_eq!(ctx.carts.item_count(), 3);
        assert_eq!(ctx.carts.total_price(), "24.98".parse::<Decimal>()?);

        Ok(())
    }

    #[tokio::test]
    async fn load_from_remote_failure_leaves_the_cart_unchanged() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "3.00"), 2);
        ctx.carts.flush().await;

        ctx.store.fail_requests(true);
        ctx.carts.load_from_remote().await;

        assert_eq!(ctx.carts.item_count(), 2);
        assert_eq!(ctx.carts.total_price(), "6.00".parse::<Decimal>()?);

        Ok(())
    }

    #[tokio::test]
    async fn mirror_failure_never_disturbs_local_state() -> TestResult {
        let ctx = TestContext::new();

        ctx.store.fail_requests(true);
        ctx.carts.add_to_cart(product(1, "9.99"), 2);
        ctx.carts.flush().await;

        assert_eq!(ctx.carts.item_count(), 2);
        assert_eq!(ctx.carts.total_price(), "19.98".parse::<Decimal>()?);

        ctx.store.fail_requests(false);
        assert!(
            ctx.store.documents("users/guest/cart").is_empty(),
            "failed mirror writes are not retried"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mirror_writes_key_off_the_owner_at_enqueue_time() -> TestResult {
        let ctx = TestContext::new();

        ctx.carts.add_to_cart(product(1, "1.00"), 1);

        ctx.session.sign_in(UserId::new("abc123"));
        ctx.carts.add_to_cart(product(2, "2.00"), 1);
        ctx.carts.flush().await;

        assert_eq!(ctx.store.documents("users/guest/cart").len(), 1);
        assert_eq!(ctx.store.documents("users/abc123/cart").len(), 1);

        Ok(())
    }
}
