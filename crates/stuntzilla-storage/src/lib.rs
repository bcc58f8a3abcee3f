//! Stuntzilla storage backends.
//!
//! The production document store (a managed Firestore-style engine) is an
//! external collaborator reached through the
//! [`DocumentStore`](stuntzilla_core::traits::DocumentStore) trait. This
//! crate provides the in-memory backend used by tests and local development.

mod memory;

pub use memory::MemoryDocumentStore;
