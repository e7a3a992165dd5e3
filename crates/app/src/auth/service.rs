//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        client::IdentityProvider,
        errors::AuthServiceError,
        models::{NewUser, UserProfile},
        session::Session,
    },
    store::{DocumentStore, StoreError},
};

/// Collection holding user profile documents, keyed by uid.
pub(crate) const USERS_COLLECTION: &str = "users";

/// Account registration, login, and logout.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with the identity provider, persist its
    /// profile document, and sign the session in.
    async fn register(&self, new_user: NewUser) -> Result<UserProfile, AuthServiceError>;

    /// Authenticate against the identity provider, load the stored profile,
    /// and sign the session in.
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthServiceError>;

    /// Clear the current session identity.
    async fn logout(&self);
}

/// Auth service backed by the external identity provider and the remote
/// document store.
pub struct RemoteAuthService {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
    session: Arc<Session>,
}

impl RemoteAuthService {
    /// Create the service over its collaborators.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            identity,
            store,
            session,
        }
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn register(&self, new_user: NewUser) -> Result<UserProfile, AuthServiceError> {
        let email = new_user.email.trim();
        let password = new_user.password.trim();

        if email.is_empty() || password.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let uid = self.identity.sign_up(email, password).await?;

        let profile = UserProfile {
            uid: uid.clone(),
            name: new_user.name,
            email: email.to_string(),
            phone: new_user.phone,
            address: new_user.address,
            role: new_user.role,
            profile_image_url: new_user.profile_image_url,
        };

        let body = serde_json::to_value(&profile).map_err(StoreError::from)?;
        self.store.set(USERS_COLLECTION, uid.as_str(), body).await?;

        // The provider signs the new account in as a side effect of
        // creating it; mirror that in the session.
        self.session.sign_in(uid);

        tracing::debug!(user = %profile.uid, "registered new account");

        Ok(profile)
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthServiceError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let uid = self.identity.sign_in(email.trim(), password.trim()).await?;

        let document = self
            .store
            .get(USERS_COLLECTION, uid.as_str())
            .await?
            .ok_or(AuthServiceError::ProfileNotFound)?;

        let profile: UserProfile =
            serde_json::from_value(document.body).map_err(StoreError::from)?;

        self.session.sign_in(uid);

        Ok(profile)
    }

    async fn logout(&self) {
        self.session.sign_out();
    }
}
