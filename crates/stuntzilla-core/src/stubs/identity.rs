//! Stub identity provider.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::IdentityError;
use crate::traits::IdentityProvider;
use crate::types::{SubjectId, VerifiedIdentity};

/// In-process identity provider for tests.
///
/// Assertions are plain strings registered up front; anything unregistered
/// fails as an invalid assertion, which doubles as the "tampered token"
/// case. Expiry is whatever the test registered, so expired-assertion paths
/// are exercised by registering a past instant.
#[derive(Default)]
pub struct StubIdentityProvider {
    identities: RwLock<HashMap<String, VerifiedIdentity>>,
    outage: RwLock<Option<String>>,
}

impl StubIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an assertion valid for one hour.
    pub fn register(&self, assertion: &str, subject: impl Into<SubjectId>) {
        self.register_with_expiry(assertion, subject, Utc::now() + Duration::hours(1));
    }

    /// Register an assertion with an explicit validity-window end.
    pub fn register_with_expiry(
        &self,
        assertion: &str,
        subject: impl Into<SubjectId>,
        expires_at: DateTime<Utc>,
    ) {
        self.identities.write().insert(
            assertion.to_string(),
            VerifiedIdentity {
                subject_id: subject.into(),
                expires_at,
            },
        );
    }

    /// Make every verification fail as a provider outage until cleared.
    pub fn set_outage(&self, reason: &str) {
        *self.outage.write() = Some(reason.to_string());
    }

    pub fn clear_outage(&self) {
        *self.outage.write() = None;
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn verify_assertion(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError> {
        if let Some(reason) = self.outage.read().clone() {
            return Err(IdentityError::ProviderUnavailable(reason));
        }
        self.identities
            .read()
            .get(assertion)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidAssertion("unknown or tampered assertion".into()))
    }
}
