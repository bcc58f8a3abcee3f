//! Stub collaborator implementations.
//!
//! # TEST ONLY - DO NOT USE IN PRODUCTION
//!
//! Deterministic, in-process implementations of the collaborator traits for
//! unit and integration tests. Full trait implementations, not mocks: they
//! honor the documented contracts (error kinds, ordering) but never touch
//! the network.
//!
//! Production counterparts live in `stuntzilla-upstream`.

mod credential;
mod identity;
mod prediction;

pub use credential::StubCredentialProvider;
pub use identity::StubIdentityProvider;
pub use prediction::StubPredictionEndpoint;
