//! Profiles service errors.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by [`crate::domain::profiles::UserProfilesService`].
#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    /// Document store error.
    #[error("storage error")]
    Store(#[from] StoreError),
}
