//! Stuntzilla Core Library
//!
//! Domain types, collaborator traits, and error taxonomy for the child-growth
//! assessment backend. Guardians register under a verified identity, register
//! dependents under themselves, and request a stunting-risk assessment
//! computed by an external prediction service.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`Guardian`, `Dependent`, `AssessmentInput`, `AccessToken`, ...)
//! - Collaborator traits (`IdentityProvider`, `DocumentStore`,
//!   `CredentialProvider`, `PredictionEndpoint`)
//! - Error types and the `Result` alias
//! - Configuration structures
//! - Stub collaborator implementations for tests
//!
//! The components that consume these seams (identity verifier, record
//! service, token cache, prediction proxy) live in `stuntzilla-service`.

pub mod config;
pub mod error;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{Result, StuntzillaError};

/// Service identity string exposed by the routing layer's root endpoint.
pub const SERVICE_NAME: &str = "STUNTZILLA";
