//! Cart mirror queue.

use std::sync::Arc;

use bazaar::products::ProductId;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::store::{DocumentStore, StoreError};

use super::records::CartItemRecord;

/// Remote collection for one owner's cart, one document per product id.
pub(crate) fn cart_path(owner: &str) -> String {
    format!("users/{owner}/cart")
}

/// One queued remote mirror operation.
///
/// Jobs carry the owner resolved at enqueue time, so a sign-in or sign-out
/// between mutations never redirects writes that were already queued.
#[derive(Debug)]
pub(crate) enum MirrorJob {
    /// Create or overwrite the line document keyed by product id.
    Upsert {
        owner: String,
        product_id: ProductId,
        record: CartItemRecord,
    },

    /// Overwrite only the quantity field of the line document.
    SetQuantity {
        owner: String,
        product_id: ProductId,
        quantity: u32,
    },

    /// Delete the line document.
    Delete {
        owner: String,
        product_id: ProductId,
    },

    /// Delete the owner's entire cart collection in one batch.
    Clear { owner: String },

    /// Acknowledge once every previously queued job has been attempted.
    Flush(oneshot::Sender<()>),
}

/// Drains mirror jobs in FIFO order.
///
/// Failures are logged and dropped: the local cart remains the source of
/// truth and the remote copy is allowed to lag, or stay stale, until the
/// next write to the same key. Nothing is retried.
pub(crate) async fn run_mirror(
    store: Arc<dyn DocumentStore>,
    mut jobs: mpsc::UnboundedReceiver<MirrorJob>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            MirrorJob::Flush(ack) => {
                if ack.send(()).is_err() {
                    tracing::debug!("mirror flush receiver dropped");
                }
            }
            job => {
                if let Err(error) = apply(store.as_ref(), &job).await {
                    tracing::warn!(%error, ?job, "cart mirror operation failed");
                }
            }
        }
    }
}

async fn apply(store: &dyn DocumentStore, job: &MirrorJob) -> Result<(), StoreError> {
    match job {
        MirrorJob::Upsert {
            owner,
            product_id,
            record,
        } => {
            let body = serde_json::to_value(record)?;
            store
                .set(&cart_path(owner), &product_id.to_string(), body)
                .await
        }
        MirrorJob::SetQuantity {
            owner,
            product_id,
            quantity,
        } => {
            store
                .update_field(
                    &cart_path(owner),
                    &product_id.to_string(),
                    "quantity",
                    Value::from(*quantity),
                )
                .await
        }
        MirrorJob::Delete { owner, product_id } => {
            store.delete(&cart_path(owner), &product_id.to_string()).await
        }
        MirrorJob::Clear { owner } => store.delete_all(&cart_path(owner)).await,
        MirrorJob::Flush(_) => Ok(()),
    }
}
