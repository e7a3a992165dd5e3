//! User profiles service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::{
    auth::{
        Session,
        models::{ProfileUpdate, UserProfile},
        service::USERS_COLLECTION,
    },
    store::{DocumentStore, StoreError},
};

use super::errors::ProfilesServiceError;

/// Reads and partial updates of the current user's profile document.
///
/// Every operation silently no-ops when no user is authenticated, matching
/// how the profile screens behave for guests.
#[automock]
#[async_trait]
pub trait UserProfilesService: Send + Sync {
    /// Profile of the current user; `None` when unauthenticated or when no
    /// profile document exists.
    async fn current_profile(&self) -> Result<Option<UserProfile>, ProfilesServiceError>;

    /// Write the non-empty fields of `update` to the current user's
    /// profile. Empty fields are left unchanged.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<(), ProfilesServiceError>;

    /// Replace the current user's profile image reference.
    async fn update_picture(&self, image_url: &str) -> Result<(), ProfilesServiceError>;
}

/// Profiles service backed by the remote document store.
pub struct RemoteUserProfilesService {
    store: Arc<dyn DocumentStore>,
    session: Arc<Session>,
}

impl RemoteUserProfilesService {
    /// Create the service over its collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, session: Arc<Session>) -> Self {
        Self { store, session }
    }
}

#[async_trait]
impl UserProfilesService for RemoteUserProfilesService {
    async fn current_profile(&self) -> Result<Option<UserProfile>, ProfilesServiceError> {
        let Some(user) = self.session.current_user_id() else {
            return Ok(None);
        };

        let Some(document) = self.store.get(USERS_COLLECTION, user.as_str()).await? else {
            return Ok(None);
        };

        let profile: UserProfile =
            serde_json::from_value(document.body).map_err(StoreError::from)?;

        Ok(Some(profile))
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<(), ProfilesServiceError> {
        let Some(user) = self.session.current_user_id() else {
            return Ok(());
        };

        let fields = [
            ("name", update.name),
            ("email", update.email),
            ("phone", update.phone),
            ("address", update.address),
        ];

        for (field, value) in fields {
            if value.is_empty() {
                continue;
            }

            self.store
                .update_field(USERS_COLLECTION, user.as_str(), field, Value::from(value))
                .await?;
        }

        Ok(())
    }

    async fn update_picture(&self, image_url: &str) -> Result<(), ProfilesServiceError> {
        let Some(user) = self.session.current_user_id() else {
            return Ok(());
        };

        self.store
            .update_field(
                USERS_COLLECTION,
                user.as_str(),
                "profile_image_url",
                Value::from(image_url),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{auth::models::UserId, test::store::MemoryDocumentStore};

    use super::*;

    fn seeded_store() -> MemoryDocumentStore {
        let store = MemoryDocumentStore::default();
        store.insert(
            USERS_COLLECTION,
            "abc123",
            json!({
                "uid": "abc123",
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "555-0100",
                "address": "1 Main St",
                "role": "user",
                "profile_image_url": ""
            }),
        );
        store
    }

    fn signed_in_session() -> Arc<Session> {
        let session = Arc::new(Session::new());
        session.sign_in(UserId::new("abc123"));
        session
    }

    #[tokio::test]
    async fn current_profile_returns_the_stored_document() -> TestResult {
        let store = seeded_store();
        let service = RemoteUserProfilesService::new(Arc::new(store), signed_in_session());

        let profile = service.current_profile().await?;

        assert!(matches!(profile, Some(profile) if profile.name == "Ada"));

        Ok(())
    }

    #[tokio::test]
    async fn current_profile_is_none_for_guests() -> TestResult {
        let store = seeded_store();
        let service =
            RemoteUserProfilesService::new(Arc::new(store), Arc::new(Session::new()));

        assert!(service.current_profile().await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_writes_only_non_empty_fields() -> TestResult {
        let store = seeded_store();
        let service =
            RemoteUserProfilesService::new(Arc::new(store.clone()), signed_in_session());

        service
            .update_profile(ProfileUpdate {
                name: "Ada Lovelace".to_string(),
                email: String::new(),
                phone: String::new(),
                address: "2 High St".to_string(),
            })
            .await?;

        let documents = store.documents(USERS_COLLECTION);
        assert_eq!(documents[0].body["name"], json!("Ada Lovelace"));
        assert_eq!(documents[0].body["email"], json!("ada@example.com"));
        assert_eq!(documents[0].body["address"], json!("2 High St"));

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_is_a_no_op_for_guests() -> TestResult {
        let store = seeded_store();
        let service =
            RemoteUserProfilesService::new(Arc::new(store.clone()), Arc::new(Session::new()));

        service
            .update_profile(ProfileUpdate {
                name: "Mallory".to_string(),
                ..ProfileUpdate::default()
            })
            .await?;

        let documents = store.documents(USERS_COLLECTION);
        assert_eq!(documents[0].body["name"], json!("Ada"));

        Ok(())
    }

    #[tokio::test]
    async fn update_picture_replaces_the_image_reference() -> TestResult {
        let store = seeded_store();
        let service =
            RemoteUserProfilesService::new(Arc::new(store.clone()), signed_in_session());

        service
            .update_picture("https://example.com/ada.png")
            .await?;

        let documents = store.documents(USERS_COLLECTION);
        assert_eq!(
            documents[0].body["profile_image_url"],
            json!("https://example.com/ada.png")
        );

        Ok(())
    }
}
