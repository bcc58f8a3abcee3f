//! Identity verifier.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use stuntzilla_core::error::{IdentityError, Result};
use stuntzilla_core::traits::IdentityProvider;
use stuntzilla_core::types::SubjectId;

/// Pure verification boundary in front of the identity provider.
///
/// Performs no caching and never mutates state; it is called once per
/// mutating or ownership-checked request. The provider validates the
/// assertion's signature; this component re-checks the validity window
/// against the local clock so an assertion that expired in transit still
/// fails with the matching kind.
pub struct IdentityVerifier {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityVerifier {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Validate an identity assertion and yield the verified subject id.
    ///
    /// # Errors
    ///
    /// - `IdentityError::InvalidAssertion` - malformed or bad signature
    /// - `IdentityError::ExpiredAssertion` - validity window has passed
    /// - `IdentityError::ProviderUnavailable` - provider unreachable
    pub async fn verify(&self, assertion: &str) -> Result<SubjectId> {
        let identity = self.provider.verify_assertion(assertion).await?;
        if identity.expires_at <= Utc::now() {
            return Err(IdentityError::ExpiredAssertion.into());
        }
        debug!(subject = %identity.subject_id, "identity assertion verified");
        Ok(identity.subject_id)
    }
}
