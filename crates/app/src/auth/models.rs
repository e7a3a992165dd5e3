//! Auth data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Opaque user identifier assigned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a provider-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User profile persisted in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-assigned identifier.
    pub uid: UserId,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: String,

    /// Delivery address.
    #[serde(default)]
    pub address: String,

    /// Account role.
    #[serde(default = "default_role")]
    pub role: String,

    /// Profile image reference.
    #[serde(default)]
    pub profile_image_url: String,
}

fn default_role() -> String {
    "user".to_string()
}

/// Registration payload.
#[derive(Clone)]
pub struct NewUser {
    /// Contact email, also the login identifier.
    pub email: String,

    /// Plaintext password, zeroized on drop.
    pub password: Zeroizing<String>,

    /// Display name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Delivery address.
    pub address: String,

    /// Account role.
    pub role: String,

    /// Profile image reference.
    pub profile_image_url: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("role", &self.role)
            .field("profile_image_url", &self.profile_image_url)
            .finish()
    }
}

/// Partial profile update. Empty fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name, if non-empty.
    pub name: String,

    /// New contact email, if non-empty.
    pub email: String,

    /// New phone number, if non-empty.
    pub phone: String,

    /// New delivery address, if non-empty.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("abc123");

        assert_eq!(serde_json::json!(id), serde_json::json!("abc123"));
    }

    #[test]
    fn profile_role_defaults_to_user() {
        let payload = serde_json::json!({
            "uid": "abc123",
            "name": "Ada",
            "email": "ada@example.com"
        });

        let profile: UserProfile =
            serde_json::from_value(payload).expect("profile should deserialize");

        assert_eq!(profile.role, "user");
    }

    #[test]
    fn new_user_debug_redacts_the_password() {
        let new_user = NewUser {
            email: "ada@example.com".to_string(),
            password: Zeroizing::new("hunter2".to_string()),
            name: "Ada".to_string(),
            phone: String::new(),
            address: String::new(),
            role: "user".to_string(),
            profile_image_url: String::new(),
        };

        let rendered = format!("{new_user:?}");

        assert!(!rendered.contains("hunter2"), "password leaked into Debug");
    }
}
