//! Application facade: the four operations the routing layer dispatches to.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use stuntzilla_core::config::Config;
use stuntzilla_core::error::{Result, StoreError};
use stuntzilla_core::traits::{
    CredentialProvider, DocumentStore, IdentityProvider, PredictionEndpoint,
};
use stuntzilla_core::types::{AssessmentInput, AssessmentResult, Dependent, DependentId, Guardian};

use crate::proxy::PredictionProxy;
use crate::records::RecordService;
use crate::token_cache::TokenCache;
use crate::verifier::IdentityVerifier;

/// Composition root over the collaborator seams.
///
/// Each operation takes validated, already-parsed fields and returns a
/// domain value or a typed error for the routing layer to map to a
/// transport response. Within one request, identity verification strictly
/// precedes the record write it authorizes.
///
/// Dependent reads are ownership-checked here: the stored owner must equal
/// the verified subject. A mismatch reports not-found rather than a
/// distinct denial, so the identifier leaks nothing about foreign records.
pub struct App {
    verifier: IdentityVerifier,
    records: RecordService,
    proxy: PredictionProxy,
}

impl App {
    /// Wire the service components over the injected collaborators.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        credentials: Arc<dyn CredentialProvider>,
        endpoint: Arc<dyn PredictionEndpoint>,
        config: &Config,
    ) -> Self {
        let tokens = Arc::new(TokenCache::new(credentials, &config.credential));
        info!(
            scope = %config.credential.scope,
            margin_secs = config.credential.refresh_margin_secs,
            "token cache initialized"
        );
        let proxy = PredictionProxy::new(endpoint, tokens, config.retry.clone());
        Self {
            verifier: IdentityVerifier::new(identity),
            records: RecordService::new(store),
            proxy,
        }
    }

    /// Register (or re-register) the calling guardian.
    pub async fn register_guardian(
        &self,
        assertion: &str,
        full_name: &str,
        nickname: &str,
    ) -> Result<Guardian> {
        let subject = self.verifier.verify(assertion).await?;
        self.records
            .upsert_guardian(&subject, full_name, nickname)
            .await
    }

    /// Create a dependent owned by the calling guardian.
    ///
    /// The owner is always the verified subject; no owner-like field in the
    /// raw request can influence it.
    pub async fn create_dependent(
        &self,
        assertion: &str,
        full_name: &str,
        birth_date: NaiveDate,
    ) -> Result<Dependent> {
        let subject = self.verifier.verify(assertion).await?;
        self.records
            .create_dependent(&subject, full_name, birth_date)
            .await
    }

    /// Fetch a dependent owned by the calling guardian.
    pub async fn get_dependent(
        &self,
        assertion: &str,
        dependent_id: DependentId,
    ) -> Result<Dependent> {
        let subject = self.verifier.verify(assertion).await?;
        let dependent = self.records.get_dependent(dependent_id).await?;
        if dependent.owner != subject {
            return Err(StoreError::DependentNotFound(dependent_id.as_uuid()).into());
        }
        Ok(dependent)
    }

    /// Run a stunting-risk assessment on the supplied features.
    pub async fn assess(&self, input: &AssessmentInput) -> Result<AssessmentResult> {
        self.proxy.assess(input).await
    }
}
