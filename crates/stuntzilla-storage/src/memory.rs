//! In-memory document store.
//!
//! # TEST/DEV ONLY
//!
//! Thread-safe via `DashMap`, no persistence: all data is lost on drop.
//! Suitable for unit tests, integration tests, and local development. The
//! write path assigns server timestamps that are strictly monotonic per
//! store instance, matching the contract the record service relies on for
//! `created_at` ordering.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use async_trait::async_trait;
use stuntzilla_core::error::StoreError;
use stuntzilla_core::traits::{Document, DocumentStore};

/// In-memory implementation of [`DocumentStore`].
///
/// Documents are keyed by `(collection, id)`. Writes overwrite, reads return
/// `None` on a miss; both are infallible here, so the `Unavailable` error
/// kind never fires from this backend.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<(String, String), Document>,
    // Guards timestamp assignment so concurrent writes never share an instant.
    last_write_at: Mutex<Option<DateTime<Utc>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Next server timestamp, strictly greater than every prior one.
    fn assign_timestamp(&self) -> DateTime<Utc> {
        let mut last = self.last_write_at.lock();
        let mut now = Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<Document, StoreError> {
        let document = Document {
            fields,
            created_at: self.assign_timestamp(),
        };
        debug!(collection, id, "document write");
        self.documents
            .insert((collection.to_string(), id.to_string()), document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .map(|entry| entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips_fields() {
        let store = MemoryDocumentStore::new();
        let written = store
            .set("guardians", "g1", json!({"full_name": "Ani"}))
            .await
            .unwrap();
        let read = store.get("guardians", "g1").await.unwrap().unwrap();
        assert_eq!(read, written);
        assert_eq!(read.fields["full_name"], "Ani");
    }

    #[tokio::test]
    async fn get_miss_is_none_not_error() {
        let store = MemoryDocumentStore::new();
        assert!(store.get("guardians", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_fields_and_advances_timestamp() {
        let store = MemoryDocumentStore::new();
        let first = store
            .set("guardians", "g1", json!({"nickname": "An"}))
            .await
            .unwrap();
        let second = store
            .set("guardians", "g1", json!({"nickname": "Ani"}))
            .await
            .unwrap();
        assert!(second.created_at > first.created_at);

        let read = store.get("guardians", "g1").await.unwrap().unwrap();
        assert_eq!(read.fields["nickname"], "Ani");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn timestamps_are_strictly_monotonic_per_write() {
        let store = MemoryDocumentStore::new();
        let mut previous = None;
        for i in 0..50 {
            let doc = store
                .set("dependents", &format!("d{i}"), json!({}))
                .await
                .unwrap();
            if let Some(prev) = previous {
                assert!(doc.created_at > prev, "write {i} did not advance the clock");
            }
            previous = Some(doc.created_at);
        }
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.set("guardians", "x", json!({"kind": "g"})).await.unwrap();
        store.set("dependents", "x", json!({"kind": "d"})).await.unwrap();
        let guardian = store.get("guardians", "x").await.unwrap().unwrap();
        let dependent = store.get("dependents", "x").await.unwrap().unwrap();
        assert_eq!(guardian.fields["kind"], "g");
        assert_eq!(dependent.fields["kind"], "d");
    }
}
