//! HTTP document store client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::{sync::mpsc, time};

use super::{Document, DocumentStore, FieldFilter, StoreError, Subscription};

/// Configuration for connecting to the document store.
#[derive(Debug, Clone)]
pub struct HttpDocumentStoreConfig {
    /// Store server address, e.g. `"http://localhost:8900"`.
    pub addr: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Interval between change polls for subscriptions.
    pub poll_interval: Duration,
}

/// HTTP client for a remote document database.
///
/// Subscriptions are change polling: the collection is re-fetched on an
/// interval and a full snapshot is emitted whenever its contents differ
/// from the last one delivered.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    config: HttpDocumentStoreConfig,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct DocumentPayload {
    id: String,
    body: Value,
}

#[derive(Debug, Deserialize)]
struct CreatedPayload {
    id: String,
}

impl HttpDocumentStore {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: HttpDocumentStoreConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.config.addr)
    }

    fn document_url(&self, path: &str, id: &str) -> String {
        format!("{}/v1/{path}/{id}", self.config.addr)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        Err(StoreError::UnexpectedResponse(format!(
            "request failed with status {status}: {text}"
        )))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, path: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .http
            .get(self.document_url(path, id))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload: DocumentPayload = Self::check(response).await?.json().await?;

        Ok(Some(Document::new(payload.id, payload.body)))
    }

    async fn get_all(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        let response = self
            .http
            .get(self.collection_url(path))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let payload: Vec<DocumentPayload> = Self::check(response).await?.json().await?;

        Ok(payload
            .into_iter()
            .map(|document| Document::new(document.id, document.body))
            .collect())
    }

    async fn set(&self, path: &str, id: &str, body: Value) -> Result<(), StoreError> {
        let response = self
            .http
            .put(self.document_url(path, id))
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn add(&self, path: &str, body: Value) -> Result<String, StoreError> {
        let response = self
            .http
            .post(self.collection_url(path))
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let payload: CreatedPayload = Self::check(response).await?.json().await?;

        Ok(payload.id)
    }

    async fn update_field(
        &self,
        path: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut patch = Map::new();
        patch.insert(field.to_string(), value);

        let response = self
            .http
            .patch(self.document_url(path, id))
            .header("x-api-key", &self.config.api_key)
            .json(&Value::Object(patch))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }

        Self::check(response).await?;

        Ok(())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.document_url(path, id))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        // Deleting an absent document is a success: the end state is the same.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::check(response).await?;

        Ok(())
    }

    async fn delete_all(&self, path: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.collection_url(path))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    fn subscribe(&self, path: &str, filter: Option<FieldFilter>) -> Subscription {
        let (tx, rx) = mpsc::channel(16);
        let store = self.clone();
        let path = path.to_string();

        tokio::spawn(async move {
            let mut interval = time::interval(store.config.poll_interval);
            let mut last: Option<Vec<Document>> = None;

            loop {
                interval.tick().await;

                let mut snapshot = match store.get_all(&path).await {
                    Ok(documents) => documents,
                    Err(error) => {
                        if tx.send(Err(error)).await.is_err() {
                            tracing::debug!(%path, "subscription receiver already dropped");
                        }
                        return;
                    }
                };

                if let Some(filter) = &filter {
                    snapshot.retain(|document| filter.matches(document));
                }

                if last.as_ref() != Some(&snapshot) {
                    if tx.send(Ok(snapshot.clone())).await.is_err() {
                        return;
                    }
                    last = Some(snapshot);
                }
            }
        });

        rx
    }
}
