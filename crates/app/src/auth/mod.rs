//! Identity and authentication.

pub mod client;
pub mod errors;
pub mod models;
pub mod service;
pub mod session;

pub use client::{IdentityClient, IdentityConfig, IdentityError, IdentityProvider};
pub use errors::AuthServiceError;
pub use service::{AuthService, RemoteAuthService};
pub use session::{GUEST_BUCKET, Session};
