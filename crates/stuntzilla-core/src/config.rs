//! Configuration structures.
//!
//! Deserializable from a config file and overridable from `STUNTZILLA_*`
//! environment variables. Process bootstrap (where the file is read from) is
//! outside the core; this module only defines the shapes and defaults.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// OAuth scope requested for the machine credential.
const DEFAULT_CREDENTIAL_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Safety margin under which a cached token is considered expiring.
const DEFAULT_REFRESH_MARGIN_SECS: i64 = 60;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credential: CredentialConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Config {
    /// Defaults with `STUNTZILLA_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(scope) = env::var("STUNTZILLA_CREDENTIAL_SCOPE") {
            config.credential.scope = scope;
        }
        if let Ok(project) = env::var("STUNTZILLA_PREDICTION_PROJECT") {
            config.prediction.project = project;
        }
        if let Ok(region) = env::var("STUNTZILLA_PREDICTION_REGION") {
            config.prediction.region = region;
        }
        if let Ok(endpoint) = env::var("STUNTZILLA_PREDICTION_ENDPOINT") {
            config.prediction.endpoint_id = endpoint;
        }
        if let Ok(attempts) = env::var("STUNTZILLA_RETRY_MAX_ATTEMPTS") {
            if let Ok(attempts) = attempts.parse() {
                config.retry.max_attempts = attempts;
            }
        }
        config
    }
}

/// Machine-credential settings for the token cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// OAuth scope requested on refresh.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// A cached token is served only while its expiry is more than this many
    /// seconds in the future.
    #[serde(default = "default_refresh_margin")]
    pub refresh_margin_secs: i64,
}

impl CredentialConfig {
    pub fn refresh_margin(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.refresh_margin_secs)
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            refresh_margin_secs: DEFAULT_REFRESH_MARGIN_SECS,
        }
    }
}

/// Deployment identifiers for the remote prediction endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    pub project: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub endpoint_id: String,
}

impl PredictionConfig {
    /// Fully-qualified `:predict` URL for this deployment.
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/endpoints/{endpoint}:predict",
            region = self.region,
            project = self.project,
            endpoint = self.endpoint_id,
        )
    }
}

/// Explicit, bounded retry policy.
///
/// The core performs no silent retries. When enabled, the prediction proxy
/// retries only the recoverable kinds (token refresh, upstream outage) with
/// exponential backoff; validation and not-found failures are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first. `1` disables retry.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff before attempt N+1 is `base_backoff_ms * 2^(N-1)`.
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
}

impl RetryPolicy {
    /// Backoff duration to sleep after the given 1-based failed attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.base_backoff_ms.saturating_mul(factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
        }
    }
}

fn default_scope() -> String {
    DEFAULT_CREDENTIAL_SCOPE.to_string()
}

fn default_refresh_margin() -> i64 {
    DEFAULT_REFRESH_MARGIN_SECS
}

fn default_region() -> String {
    "us-central1".to_string()
}

fn default_max_attempts() -> u32 {
    1
}

fn default_base_backoff_ms() -> u64 {
    500
}
