//! Sub-error types for stuntzilla-core.
//!
//! Each error type covers a specific domain of failures.

use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY ERROR
// ============================================================================

/// Identity-verification errors.
///
/// Covers failures of the identity-assertion check performed before every
/// mutating or ownership-checked request.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Assertion is malformed or its signature does not validate.
    #[error("Invalid identity assertion: {0}")]
    InvalidAssertion(String),

    /// Assertion's validity window has passed.
    #[error("Expired identity assertion")]
    ExpiredAssertion,

    /// Identity provider could not be reached.
    ///
    /// # Recovery
    ///
    /// Can be retried; the assertion itself may still be valid.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

// ============================================================================
// STORE ERROR
// ============================================================================

/// Record-store errors.
///
/// Covers document-store operations and entity lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Guardian lookup miss.
    #[error("Guardian not found: {0}")]
    GuardianNotFound(String),

    /// Dependent lookup miss.
    #[error("Dependent not found: {0}")]
    DependentNotFound(Uuid),

    /// Persistence collaborator failure.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Stored document could not be decoded into an entity.
    ///
    /// # Critical
    ///
    /// Indicates corrupt or schema-drifted data and requires investigation.
    #[error("Serialization error in {collection}/{id}: {reason}")]
    Serialization {
        /// Collection holding the bad document
        collection: String,
        /// Document identifier
        id: String,
        /// Decode failure reason
        reason: String,
    },
}

impl StoreError {
    /// True for lookup misses, false for infrastructure failures.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuardianNotFound(_) | Self::DependentNotFound(_)
        )
    }
}

// ============================================================================
// TOKEN ERROR
// ============================================================================

/// Access-token errors.
///
/// Covers machine-credential refresh failures surfaced by the token cache.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Credential refresh failed; all waiters on the in-flight refresh
    /// observe this same outcome.
    ///
    /// # Recovery
    ///
    /// Can be retried; the cache does not poison itself and the next call
    /// initiates a fresh refresh.
    #[error("Access token unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// UPSTREAM ERROR
// ============================================================================

/// Prediction-endpoint errors.
///
/// Any of these surfaces to the caller of `assess` as an upstream failure.
/// They are never swallowed after being logged.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure reaching the prediction endpoint.
    #[error("Prediction endpoint unreachable: {0}")]
    Transport(String),

    /// Prediction endpoint answered with a non-2xx status.
    #[error("Prediction endpoint returned status {0}")]
    Status(u16),

    /// Response body did not contain the expected predictions shape.
    #[error("Malformed prediction response: {0}")]
    MalformedResponse(String),
}
