//! Access token and verified identity types.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SubjectId;

/// Short-lived machine credential authorizing calls to the external
/// prediction service.
///
/// Held process-wide in the token cache; the secret is never logged — the
/// `Debug` impl redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// The opaque credential string, for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True while the expiry instant is more than `margin` in the future.
    ///
    /// The token cache serves cached tokens only while this holds, so a
    /// token handed to a caller cannot expire mid-request within the margin.
    pub fn is_fresh(&self, margin: Duration) -> bool {
        self.expires_at - Utc::now() > margin
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Outcome of a successful identity-assertion verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Stable subject identifier bound into the assertion.
    pub subject_id: SubjectId,
    /// End of the assertion's validity window.
    pub expires_at: DateTime<Utc>,
}
