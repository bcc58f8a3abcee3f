//! Identity provider trait.

use async_trait::async_trait;

use crate::error::IdentityError;
use crate::types::VerifiedIdentity;

/// Trusted external identity provider.
///
/// This is a pure verification boundary: implementations perform no local
/// caching and never mutate state. The identity verifier calls it once per
/// mutating or ownership-checked request.
///
/// # Errors
///
/// - `IdentityError::InvalidAssertion` — assertion malformed or its
///   signature does not validate
/// - `IdentityError::ExpiredAssertion` — validity window has passed (the
///   verifier also re-checks the returned expiry against the local clock)
/// - `IdentityError::ProviderUnavailable` — the provider itself is
///   unreachable
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validate a caller-supplied signed identity assertion.
    ///
    /// # Returns
    ///
    /// The subject identifier bound into the assertion plus the end of its
    /// validity window.
    async fn verify_assertion(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError>;
}
