//! Orders service errors.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by [`crate::domain::orders::OrdersService`].
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The remote order write failed; no partial order state is retained.
    #[error("order placement failed")]
    PlacementFailed(#[source] StoreError),

    /// Document store error while streaming order snapshots.
    #[error("storage error")]
    Store(#[from] StoreError),
}
