//! Profiles

pub mod errors;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::{RemoteUserProfilesService, UserProfilesService};
