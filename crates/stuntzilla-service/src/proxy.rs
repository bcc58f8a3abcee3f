//! Prediction proxy.

use std::sync::Arc;

use tracing::{error, warn};

use stuntzilla_core::config::RetryPolicy;
use stuntzilla_core::error::{Result, StuntzillaError, UpstreamError};
use stuntzilla_core::traits::PredictionEndpoint;
use stuntzilla_core::types::{AssessmentInput, AssessmentResult, FeatureVector};

use crate::token_cache::TokenCache;

/// Assembles the feature vector, attaches a cached access token, calls the
/// prediction endpoint, and translates the score into a category plus
/// advisory message.
///
/// Validation happens before any network traffic: an input with a missing
/// or non-finite feature fails without touching the token cache or the
/// endpoint. Upstream failures always surface to the caller as typed
/// errors — they are logged for diagnostics and then returned, never
/// swallowed.
///
/// Retry is explicit, bounded, and off by default ([`RetryPolicy`]); only
/// the recoverable kinds (token refresh, upstream outage) are retried.
pub struct PredictionProxy {
    endpoint: Arc<dyn PredictionEndpoint>,
    tokens: Arc<TokenCache>,
    retry: RetryPolicy,
}

impl PredictionProxy {
    pub fn new(
        endpoint: Arc<dyn PredictionEndpoint>,
        tokens: Arc<TokenCache>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            endpoint,
            tokens,
            retry,
        }
    }

    /// Run a stunting-risk assessment.
    ///
    /// # Errors
    ///
    /// - `StuntzillaError::Validation` - missing or non-finite feature
    /// - `StuntzillaError::Token` - credential refresh failed
    /// - `StuntzillaError::Upstream` - endpoint failure or malformed response
    pub async fn assess(&self, input: &AssessmentInput) -> Result<AssessmentResult> {
        let features = input.to_features()?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.attempt(&features).await {
                Ok(result) => return Ok(result),
                Err(err) if attempt < self.retry.max_attempts && err.is_recoverable() => {
                    let backoff = self.retry.backoff(attempt);
                    warn!(
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "assessment attempt failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => {
                    error!(attempt, error = %err, "assessment failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, features: &FeatureVector) -> Result<AssessmentResult> {
        let token = self.tokens.get_token().await?;
        let scores = self
            .endpoint
            .predict(std::slice::from_ref(features), &token)
            .await?;
        let score = scores.first().copied().ok_or_else(|| {
            StuntzillaError::Upstream(UpstreamError::MalformedResponse(
                "no prediction returned for instance".into(),
            ))
        })?;
        Ok(AssessmentResult::from_score(score))
    }
}

#[cfg(test)]
mod tests {
    use stuntzilla_core::config::CredentialConfig;
    use stuntzilla_core::stubs::{StubCredentialProvider, StubPredictionEndpoint};
    use stuntzilla_core::types::RiskCategory;

    use super::*;

    fn proxy_with(endpoint: Arc<StubPredictionEndpoint>, retry: RetryPolicy) -> PredictionProxy {
        let tokens = Arc::new(TokenCache::new(
            Arc::new(StubCredentialProvider::new()),
            &CredentialConfig::default(),
        ));
        PredictionProxy::new(endpoint, tokens, retry)
    }

    fn complete_input() -> AssessmentInput {
        AssessmentInput {
            sex: Some(0.0),
            age: Some(30.0),
            birth_weight: Some(2.9),
            birth_length: Some(47.5),
            body_weight: Some(10.2),
            body_length: Some(80.0),
        }
    }

    #[tokio::test]
    async fn positive_score_maps_to_normal() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(0.6));
        let proxy = proxy_with(endpoint, RetryPolicy::default());

        let result = proxy.assess(&complete_input()).await.unwrap();
        assert_eq!(result.category, RiskCategory::Normal);
    }

    #[tokio::test]
    async fn score_rounding_to_zero_maps_to_stunting() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(-0.2));
        let proxy = proxy_with(endpoint, RetryPolicy::default());

        let result = proxy.assess(&complete_input()).await.unwrap();
        assert_eq!(result.category, RiskCategory::Stunting);
    }

    #[tokio::test]
    async fn missing_feature_fails_before_any_network_call() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(1.0));
        let tokens_provider = Arc::new(StubCredentialProvider::new());
        let tokens = Arc::new(TokenCache::new(
            tokens_provider.clone(),
            &CredentialConfig::default(),
        ));
        let proxy = PredictionProxy::new(endpoint.clone(), tokens, RetryPolicy::default());

        let mut input = complete_input();
        input.age = None;
        let err = proxy.assess(&input).await.unwrap_err();

        assert!(matches!(err, StuntzillaError::Validation(_)));
        assert_eq!(endpoint.call_count(), 0);
        assert_eq!(tokens_provider.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_to_caller() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(1.0));
        endpoint.push_failure(UpstreamError::Status(503));
        let proxy = proxy_with(endpoint, RetryPolicy::default());

        let err = proxy.assess(&complete_input()).await.unwrap_err();
        assert!(matches!(
            err,
            StuntzillaError::Upstream(UpstreamError::Status(503))
        ));
    }

    #[tokio::test]
    async fn retry_policy_recovers_from_transient_upstream_failure() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(2.0));
        endpoint.push_failure(UpstreamError::Transport("connection reset".into()));
        let proxy = proxy_with(
            endpoint.clone(),
            RetryPolicy {
                max_attempts: 2,
                base_backoff_ms: 1,
            },
        );

        let result = proxy.assess(&complete_input()).await.unwrap();
        assert_eq!(result.category, RiskCategory::Normal);
        assert_eq!(endpoint.call_count(), 2);
    }

    #[tokio::test]
    async fn validation_failures_are_never_retried() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(2.0));
        let proxy = proxy_with(
            endpoint.clone(),
            RetryPolicy {
                max_attempts: 3,
                base_backoff_ms: 1,
            },
        );

        let mut input = complete_input();
        input.sex = None;
        assert!(proxy.assess(&input).await.is_err());
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test]
    async fn bearer_token_accompanies_the_call() {
        let endpoint = Arc::new(StubPredictionEndpoint::with_score(1.0));
        let proxy = proxy_with(endpoint.clone(), RetryPolicy::default());

        proxy.assess(&complete_input()).await.unwrap();
        let (instances, secret) = endpoint.last_request().unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(secret, "stub-token-1");
    }
}
