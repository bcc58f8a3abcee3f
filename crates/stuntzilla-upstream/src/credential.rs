//! HTTP credential provider.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use stuntzilla_core::error::TokenError;
use stuntzilla_core::traits::CredentialProvider;
use stuntzilla_core::types::AccessToken;

/// Machine-credential fetch against an OAuth-style token endpoint.
///
/// Wire contract: `POST {token_url}` with `{"scope": "..."}`; a 2xx response
/// carries `{"access_token": "...", "expires_in": <seconds>}`. Every failure
/// mode collapses to `TokenError::Unavailable` — callers go through the
/// token cache, which only needs success-or-retry-later.
pub struct HttpCredentialProvider {
    agent: ureq::Agent,
    token_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl HttpCredentialProvider {
    pub fn new(agent: ureq::Agent, token_url: impl Into<String>) -> Self {
        Self {
            agent,
            token_url: token_url.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for HttpCredentialProvider {
    async fn fetch_access_token(&self, scope: &str) -> Result<AccessToken, TokenError> {
        let agent = self.agent.clone();
        let url = self.token_url.clone();
        let body = json!({ "scope": scope });

        let result = tokio::task::spawn_blocking(move || {
            let response = agent
                .post(&url)
                .set("Accept", "application/json")
                .send_json(body)
                .map_err(|e| match e {
                    ureq::Error::Status(status, _) => {
                        TokenError::Unavailable(format!("token endpoint returned status {status}"))
                    }
                    ureq::Error::Transport(t) => TokenError::Unavailable(t.to_string()),
                })?;
            let parsed: TokenResponse = serde_json::from_reader(response.into_reader())
                .map_err(|e| TokenError::Unavailable(format!("malformed token response: {e}")))?;
            Ok(AccessToken::new(
                parsed.access_token,
                Utc::now() + Duration::seconds(parsed.expires_in),
            ))
        })
        .await
        .map_err(|e| TokenError::Unavailable(format!("token fetch task failed: {e}")))?;

        if let Err(err) = &result {
            warn!(error = %err, "credential refresh failed");
        }
        result
    }
}
