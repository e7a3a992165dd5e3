//! Document store access.

mod http;

pub use http::{HttpDocumentStore, HttpDocumentStoreConfig};

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// A single document within a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document identifier, unique within its collection.
    pub id: String,

    /// Document body.
    pub body: Value,
}

impl Document {
    /// Create a document.
    #[must_use]
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

/// Equality predicate applied to subscription snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Top-level field to compare.
    pub field: String,

    /// Value the field must equal.
    pub value: Value,
}

impl FieldFilter {
    /// Create a filter matching documents whose `field` equals `value`.
    #[must_use]
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Whether `document` matches the filter.
    pub fn matches(&self, document: &Document) -> bool {
        document.body.get(&self.field) == Some(&self.value)
    }
}

/// Live sequence of collection snapshots.
///
/// The channel closes after delivering the first error; restarting is the
/// subscriber's responsibility.
pub type Subscription = mpsc::Receiver<Result<Vec<Document>, StoreError>>;

/// Errors raised by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-2xx response or an unexpected body.
    #[error("unexpected response from document store: {0}")]
    UnexpectedResponse(String),

    /// The addressed document does not exist.
    #[error("document not found")]
    NotFound,

    /// A document body could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store rejected the operation outright.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous access to a remote document database.
///
/// Collections are addressed by slash-separated paths, e.g.
/// `users/abc123/cart`. Every operation is independently fallible; none is
/// retried here.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document, `None` when absent.
    async fn get(&self, path: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch every document in the collection.
    async fn get_all(&self, path: &str) -> Result<Vec<Document>, StoreError>;

    /// Create or overwrite the document with the given id.
    async fn set(&self, path: &str, id: &str, body: Value) -> Result<(), StoreError>;

    /// Append a document under a store-generated id, returning that id.
    async fn add(&self, path: &str, body: Value) -> Result<String, StoreError>;

    /// Overwrite a single field of an existing document.
    async fn update_field(
        &self,
        path: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    /// Delete a single document. Deleting an absent document succeeds.
    async fn delete(&self, path: &str, id: &str) -> Result<(), StoreError>;

    /// Delete every document in the collection as one batch.
    async fn delete_all(&self, path: &str) -> Result<(), StoreError>;

    /// Subscribe to collection snapshots: the current contents immediately,
    /// then a fresh full snapshot after each change. The sequence closes
    /// after the first error.
    fn subscribe(&self, path: &str, filter: Option<FieldFilter>) -> Subscription;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_filter_matches_on_equality() {
        let filter = FieldFilter::new("owner", json!("guest"));

        let matching = Document::new("1", json!({ "owner": "guest", "total": 3 }));
        let other_owner = Document::new("2", json!({ "owner": "abc" }));
        let missing_field = Document::new("3", json!({ "total": 3 }));

        assert!(filter.matches(&matching));
        assert!(!filter.matches(&other_owner));
        assert!(!filter.matches(&missing_field));
    }
}
