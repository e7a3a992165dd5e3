//! Auth service errors.

use thiserror::Error;

use crate::{auth::client::IdentityError, store::StoreError};

/// Errors surfaced by [`crate::auth::AuthService`] operations.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Email or password was blank.
    #[error("email and password cannot be empty")]
    MissingCredentials,

    /// The email is already registered.
    #[error("email already exists")]
    EmailTaken,

    /// The provider rejected the email/password pair.
    #[error("email or password is incorrect")]
    InvalidCredentials,

    /// The provider accepted the credentials but no profile document exists.
    #[error("user profile not found")]
    ProfileNotFound,

    /// Identity provider error.
    #[error("identity provider error")]
    Identity(#[source] IdentityError),

    /// Document store error.
    #[error("storage error")]
    Store(#[from] StoreError),
}

impl From<IdentityError> for AuthServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::EmailTaken => Self::EmailTaken,
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            error => Self::Identity(error),
        }
    }
}
