//! Top-level unified error type for the stuntzilla workspace.

use thiserror::Error;

use super::sub_errors::{IdentityError, StoreError, TokenError, UpstreamError};

// ============================================================================
// TOP-LEVEL UNIFIED ERROR TYPE
// ============================================================================

/// Top-level unified error type.
///
/// All workspace errors are convertible to this type via `From`
/// implementations. The routing layer above the core maps each variant to a
/// transport-level status; nothing here is recovered silently.
///
/// # Recoverability
///
/// Errors are classified as recoverable or non-recoverable:
/// - Recoverable: a bounded retry with backoff may succeed
///   (token refresh, upstream outage, provider outage)
/// - Non-recoverable: retrying cannot help (validation, not-found,
///   invalid or expired assertions)
///
/// # Examples
///
/// ```rust
/// use stuntzilla_core::error::{StuntzillaError, TokenError};
///
/// let err = StuntzillaError::Token(TokenError::Unavailable("timeout".into()));
/// assert!(err.is_recoverable());
///
/// let err = StuntzillaError::validation("missing birth date");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum StuntzillaError {
    /// Identity-verification error.
    ///
    /// Covers invalid/expired assertions and provider outages.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Record-store error.
    ///
    /// Covers lookup misses and persistence-collaborator failures.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Access-token error.
    ///
    /// Covers credential refresh failures.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Prediction-endpoint error.
    ///
    /// Covers transport failures, non-2xx statuses, and malformed responses.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Validation error for input data.
    ///
    /// # When This Occurs
    ///
    /// - Required field empty or absent
    /// - NaN or Infinity in a numeric feature
    #[error("Validation error: {0}")]
    Validation(String),
}

impl StuntzillaError {
    /// Check if this error is worth retrying with bounded backoff.
    ///
    /// The core itself performs no automatic retries beyond the explicit
    /// [`RetryPolicy`](crate::config::RetryPolicy); callers wrapping core
    /// operations should consult this before scheduling one.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Identity(IdentityError::ProviderUnavailable(_))
                | Self::Store(StoreError::Unavailable(_))
                | Self::Token(TokenError::Unavailable(_))
                | Self::Upstream(_)
        )
    }

    /// True when the error is an entity lookup miss.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Create a validation error from a message.
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for stuntzilla operations.
///
/// # Examples
///
/// ```rust
/// use stuntzilla_core::error::{Result, StuntzillaError};
///
/// fn reject_empty(name: &str) -> Result<()> {
///     if name.trim().is_empty() {
///         return Err(StuntzillaError::validation("name must not be empty"));
///     }
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, StuntzillaError>;
