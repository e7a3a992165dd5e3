//! Identity provider REST client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::models::UserId;

/// Configuration for connecting to the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider address, e.g. `"http://localhost:9099"`.
    pub addr: String,

    /// Project API key sent with every request.
    pub api_key: String,
}

/// Errors that can occur when communicating with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The email is already registered with the provider.
    #[error("email already registered")]
    EmailTaken,

    /// The provider rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}

/// Credential operations offered by the external identity provider.
///
/// Only the provider's REST surface is consumed here; the authentication
/// protocol itself stays on the provider's side.
#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account, returning its provider-assigned identifier.
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, IdentityError>;

    /// Verify credentials, returning the account's identifier.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, IdentityError>;
}

/// HTTP client for the external identity provider.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    config: IdentityConfig,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct AccountPayload {
    uid: String,
}

impl IdentityClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn credential_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<(StatusCode, String), IdentityError> {
        let url = format!("{}/v1/accounts/{endpoint}", self.config.addr);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        Ok((status, text))
    }

    fn parse_account(endpoint: &str, status: StatusCode, text: &str) -> Result<UserId, IdentityError> {
        if status.is_success() {
            let payload: AccountPayload = serde_json::from_str(text).map_err(|error| {
                IdentityError::UnexpectedResponse(format!("malformed account body: {error}"))
            })?;

            return Ok(UserId::new(payload.uid));
        }

        match status {
            StatusCode::CONFLICT => Err(IdentityError::EmailTaken),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
                Err(IdentityError::InvalidCredentials)
            }
            status => Err(IdentityError::UnexpectedResponse(format!(
                "{endpoint} request failed with status {status}: {text}"
            ))),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        let (status, text) = self.credential_request("signup", email, password).await?;

        Self::parse_account("signup", status, &text)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        let (status, text) = self.credential_request("signin", email, password).await?;

        Self::parse_account("signin", status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_body_yields_the_uid() {
        let parsed = IdentityClient::parse_account("signin", StatusCode::OK, r#"{"uid":"abc123"}"#);

        assert!(matches!(parsed, Ok(id) if id.as_str() == "abc123"));
    }

    #[test]
    fn conflict_maps_to_email_taken() {
        let parsed = IdentityClient::parse_account("signup", StatusCode::CONFLICT, "");

        assert!(matches!(parsed, Err(IdentityError::EmailTaken)));
    }

    #[test]
    fn unauthorized_maps_to_invalid_credentials() {
        let parsed = IdentityClient::parse_account("signin", StatusCode::UNAUTHORIZED, "");

        assert!(matches!(parsed, Err(IdentityError::InvalidCredentials)));
    }

    #[test]
    fn other_failures_surface_the_status() {
        let parsed =
            IdentityClient::parse_account("signin", StatusCode::INTERNAL_SERVER_ERROR, "boom");

        assert!(matches!(parsed, Err(IdentityError::UnexpectedResponse(message))
            if message.contains("500") && message.contains("boom")));
    }
}
