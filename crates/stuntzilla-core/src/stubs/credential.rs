//! Stub credential provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TokenError;
use crate::traits::CredentialProvider;
use crate::types::AccessToken;

/// In-process credential provider for tests.
///
/// Counts fetches (the single-flight tests assert on this), mints
/// distinguishable tokens (`stub-token-1`, `stub-token-2`, ...), and can be
/// scripted to fail or to stall so concurrent callers overlap an in-flight
/// refresh.
pub struct StubCredentialProvider {
    calls: AtomicUsize,
    ttl: Duration,
    delay: StdDuration,
    fail_next: Mutex<usize>,
}

impl StubCredentialProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ttl: Duration::hours(1),
            delay: StdDuration::ZERO,
            fail_next: Mutex::new(0),
        }
    }

    /// Tokens minted by this stub expire after `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Stall each fetch, forcing concurrent callers to pile up on one
    /// in-flight refresh.
    pub fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next `n` fetches with `TokenError::Unavailable`.
    pub fn fail_next(&self, n: usize) {
        *self.fail_next.lock() = n;
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StubCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for StubCredentialProvider {
    async fn fetch_access_token(&self, _scope: &str) -> Result<AccessToken, TokenError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, "stub credential fetch");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        {
            let mut remaining = self.fail_next.lock();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TokenError::Unavailable("scripted refresh failure".into()));
            }
        }
        Ok(AccessToken::new(
            format!("stub-token-{call}"),
            Utc::now() + self.ttl,
        ))
    }
}
