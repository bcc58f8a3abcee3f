//! Process-wide access-token cache with single-flight refresh.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use stuntzilla_core::config::CredentialConfig;
use stuntzilla_core::error::TokenError;
use stuntzilla_core::traits::CredentialProvider;
use stuntzilla_core::types::AccessToken;

/// Outcome broadcast to waiters of an in-flight refresh.
#[derive(Clone)]
enum RefreshOutcome {
    Pending,
    Ready(AccessToken),
    Failed(String),
}

struct CacheState {
    cached: Option<AccessToken>,
    /// Present while a refresh is in flight; waiters subscribe to it.
    inflight: Option<watch::Receiver<RefreshOutcome>>,
}

/// Role a caller takes when the cached token is stale, decided under the
/// lock and carried out after it is released.
enum Role {
    Initiator(watch::Sender<RefreshOutcome>),
    Waiter(watch::Receiver<RefreshOutcome>),
}

/// Expiry-aware cache of the machine credential, shared by all in-flight
/// requests.
///
/// A cached token is served while its expiry is more than the configured
/// safety margin in the future. Otherwise exactly one caller refreshes
/// against the credential provider; every other concurrent caller awaits
/// that single refresh and receives its result, success or failure. The
/// mutex guards only the cache entry — it is never held across the network
/// call; waiters suspend on a watch channel instead of spinning.
///
/// A refresh failure is delivered to all waiters as `TokenError::Unavailable`
/// but does not poison the cache: the next call initiates a fresh refresh.
/// If the initiating task is cancelled mid-refresh, its drop guard clears
/// the in-flight slot and the waiters loop back, electing a new initiator,
/// so nobody is left without a result.
pub struct TokenCache {
    provider: Arc<dyn CredentialProvider>,
    scope: String,
    margin: Duration,
    state: Mutex<CacheState>,
}

impl TokenCache {
    pub fn new(provider: Arc<dyn CredentialProvider>, config: &CredentialConfig) -> Self {
        Self {
            provider,
            scope: config.scope.clone(),
            margin: config.refresh_margin(),
            state: Mutex::new(CacheState {
                cached: None,
                inflight: None,
            }),
        }
    }

    /// Get a fresh access token, refreshing at most once across all
    /// concurrent callers.
    ///
    /// # Errors
    ///
    /// `TokenError::Unavailable` when the refresh this call observed failed.
    pub async fn get_token(&self) -> Result<AccessToken, TokenError> {
        loop {
            // Fast path and refresh election under the lock; no awaits
            // while the guard is live, so the future stays `Send`.
            let role = {
                let mut state = self.state.lock();
                if let Some(token) = &state.cached {
                    if token.is_fresh(self.margin) {
                        return Ok(token.clone());
                    }
                }
                match state.inflight.clone() {
                    Some(rx) => Role::Waiter(rx),
                    None => {
                        let (tx, rx) = watch::channel(RefreshOutcome::Pending);
                        state.inflight = Some(rx);
                        Role::Initiator(tx)
                    }
                }
            };
            let mut rx = match role {
                Role::Initiator(tx) => return self.run_refresh(tx).await,
                Role::Waiter(rx) => rx,
            };

            // Waiter path: suspend until the initiator publishes an outcome.
            loop {
                match rx.borrow_and_update().clone() {
                    RefreshOutcome::Ready(token) => return Ok(token),
                    RefreshOutcome::Failed(reason) => {
                        return Err(TokenError::Unavailable(reason))
                    }
                    RefreshOutcome::Pending => {}
                }
                if rx.changed().await.is_err() {
                    // Initiator was cancelled without publishing; re-enter
                    // and let one waiter become the new initiator.
                    debug!("token refresh abandoned, re-electing initiator");
                    break;
                }
            }
        }
    }

    /// Initiator path: perform the refresh and publish the outcome.
    async fn run_refresh(
        &self,
        tx: watch::Sender<RefreshOutcome>,
    ) -> Result<AccessToken, TokenError> {
        let mut guard = InflightGuard {
            state: &self.state,
            armed: true,
        };
        debug!(scope = %self.scope, "refreshing access token");
        let fetched = self.provider.fetch_access_token(&self.scope).await;

        {
            let mut state = self.state.lock();
            state.inflight = None;
            if let Ok(token) = &fetched {
                state.cached = Some(token.clone());
            }
        }
        guard.armed = false;

        match fetched {
            Ok(token) => {
                debug!(expires_at = %token.expires_at(), "access token refreshed");
                let _ = tx.send(RefreshOutcome::Ready(token.clone()));
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "access token refresh failed");
                let _ = tx.send(RefreshOutcome::Failed(err.to_string()));
                Err(err)
            }
        }
    }
}

/// Clears the in-flight slot if the initiating task is dropped before it
/// publishes an outcome; the sender drops with it, waking every waiter.
struct InflightGuard<'a> {
    state: &'a Mutex<CacheState>,
    armed: bool,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().inflight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use stuntzilla_core::stubs::StubCredentialProvider;

    use super::*;

    fn cache_with(provider: Arc<StubCredentialProvider>) -> TokenCache {
        TokenCache::new(provider, &CredentialConfig::default())
    }

    // Callers hand get_token futures to tokio::spawn; they must be Send.
    #[test]
    fn get_token_future_is_spawnable() {
        fn assert_send<T: Send>(_: T) {}
        let cache = cache_with(Arc::new(StubCredentialProvider::new()));
        assert_send(cache.get_token());
    }

    #[tokio::test]
    async fn cold_cache_fetches_once_then_serves_cached() {
        let provider = Arc::new(StubCredentialProvider::new());
        let cache = cache_with(provider.clone());

        let first = cache.get_token().await.unwrap();
        let second = cache.get_token().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn token_within_margin_triggers_refresh() {
        // ttl shorter than the 60s margin: always treated as expiring
        let provider =
            Arc::new(StubCredentialProvider::new().with_ttl(chrono::Duration::seconds(30)));
        let cache = cache_with(provider.clone());

        cache.get_token().await.unwrap();
        cache.get_token().await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn n_concurrent_cold_calls_invoke_provider_exactly_once() {
        let provider =
            Arc::new(StubCredentialProvider::new().with_delay(StdDuration::from_millis(50)));
        let cache = Arc::new(cache_with(provider.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.get_token().await }));
        }
        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(provider.call_count(), 1);
        assert!(tokens.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn refresh_failure_reaches_all_waiters_without_poisoning() {
        let provider =
            Arc::new(StubCredentialProvider::new().with_delay(StdDuration::from_millis(50)));
        provider.fail_next(1);
        let cache = Arc::new(cache_with(provider.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.get_token().await }));
        }
        for handle in handles {
            let result = handle.await.unwrap();
            assert!(matches!(result, Err(TokenError::Unavailable(_))));
        }
        assert_eq!(provider.call_count(), 1);

        // Next call retries a fresh refresh and succeeds.
        let token = cache.get_token().await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert!(token.is_fresh(Duration::seconds(60)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn cancelled_initiator_hands_off_to_a_waiter() {
        let provider =
            Arc::new(StubCredentialProvider::new().with_delay(StdDuration::from_millis(80)));
        let cache = Arc::new(cache_with(provider.clone()));

        // Initiator starts the refresh, then gets aborted mid-flight.
        let initiator = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_token().await })
        };
        tokio::time::sleep(StdDuration::from_millis(20)).await;

        let waiter = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_token().await })
        };
        tokio::time::sleep(StdDuration::from_millis(20)).await;
        initiator.abort();

        // The waiter must still end with a real outcome.
        let token = waiter.await.unwrap().unwrap();
        assert!(token.is_fresh(Duration::seconds(60)));
        assert_eq!(provider.call_count(), 2);
    }
}
