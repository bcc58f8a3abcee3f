//! Collaborator traits.
//!
//! The core talks to four external collaborators, each behind an object-safe
//! async trait so the service components can be wired with `Arc<dyn Trait>`
//! and tested against the stubs in [`crate::stubs`]:
//!
//! - [`IdentityProvider`]: verifies identity assertions
//! - [`DocumentStore`]: minimal read/write interface over the document store
//! - [`CredentialProvider`]: fetches the machine credential
//! - [`PredictionEndpoint`]: the remote prediction service
//!
//! All methods are async; the suspension points of the system are exactly
//! these network calls. Every trait requires `Send + Sync` for use across
//! concurrent request tasks.

mod credential_provider;
mod document_store;
mod identity_provider;
mod prediction_endpoint;

pub use credential_provider::CredentialProvider;
pub use document_store::{Document, DocumentStore};
pub use identity_provider::IdentityProvider;
pub use prediction_endpoint::PredictionEndpoint;
