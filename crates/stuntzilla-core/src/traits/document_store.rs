//! Document store trait.
//!
//! The persistence engine itself is an external collaborator; the core only
//! consumes this minimal collection-style get/set interface. Higher layers
//! depend on the trait, not a concrete backend, which keeps the record
//! service testable without any real store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::StoreError;

/// A stored document: its JSON fields plus the server-assigned timestamp of
/// the write that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// JSON object holding the entity fields.
    pub fields: Value,
    /// Server-assigned write timestamp, monotonic per write within a store.
    pub created_at: DateTime<Utc>,
}

/// Collection-style document storage.
///
/// No transactions are required across collections; each write is
/// independent. Writes overwrite any existing document under the same
/// `(collection, id)` path, which is what makes guardian registration an
/// idempotent upsert.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write (or overwrite) a document.
    ///
    /// # Arguments
    /// * `collection` - Collection name, e.g. `"guardians"`
    /// * `id` - Document identifier within the collection
    /// * `fields` - JSON object of entity fields
    ///
    /// # Returns
    /// The written document including the server-assigned timestamp.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend failure
    async fn set(&self, collection: &str, id: &str, fields: Value)
        -> Result<Document, StoreError>;

    /// Read a document by identifier.
    ///
    /// # Returns
    /// `Some(document)` if present, `None` for a lookup miss. Misses are not
    /// errors at this layer; the record service maps them to the typed
    /// not-found kinds.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` - Backend failure
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
}
