//! HTTP identity provider.

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use stuntzilla_core::error::IdentityError;
use stuntzilla_core::traits::IdentityProvider;
use stuntzilla_core::types::VerifiedIdentity;

/// Identity provider that posts assertions to a verification endpoint.
///
/// Wire contract: `POST {verify_url}` with `{"assertion": "..."}`. A 2xx
/// response carries `{"subject_id": "...", "expires_at": "<rfc3339>"}` —
/// returned even for an already-expired assertion, since the verifier
/// component re-checks the window against its own clock. Any 4xx means the
/// assertion is malformed or fails signature validation.
pub struct HttpIdentityProvider {
    agent: ureq::Agent,
    verify_url: String,
}

impl HttpIdentityProvider {
    pub fn new(agent: ureq::Agent, verify_url: impl Into<String>) -> Self {
        Self {
            agent,
            verify_url: verify_url.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_assertion(&self, assertion: &str) -> Result<VerifiedIdentity, IdentityError> {
        let agent = self.agent.clone();
        let url = self.verify_url.clone();
        let body = json!({ "assertion": assertion });

        let result = tokio::task::spawn_blocking(move || {
            let response = agent
                .post(&url)
                .set("Accept", "application/json")
                .send_json(body)
                .map_err(|e| match e {
                    ureq::Error::Status(status, _) => IdentityError::InvalidAssertion(format!(
                        "identity provider rejected assertion (status {status})"
                    )),
                    ureq::Error::Transport(t) => {
                        IdentityError::ProviderUnavailable(t.to_string())
                    }
                })?;
            serde_json::from_reader::<_, VerifiedIdentity>(response.into_reader()).map_err(|e| {
                IdentityError::ProviderUnavailable(format!("malformed verification response: {e}"))
            })
        })
        .await
        .map_err(|e| IdentityError::ProviderUnavailable(format!("verification task failed: {e}")))?;

        if let Err(err) = &result {
            warn!(error = %err, "identity assertion verification failed");
        }
        result
    }
}
