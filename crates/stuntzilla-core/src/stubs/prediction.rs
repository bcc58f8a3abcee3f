//! Stub prediction endpoint.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::UpstreamError;
use crate::traits::PredictionEndpoint;
use crate::types::{AccessToken, FeatureVector};

/// In-process prediction endpoint for tests.
///
/// Returns scripted scores in order, then falls back to `default_score`.
/// Records the instances and token secret of the last call so tests can
/// assert what actually went over the seam — in particular that validation
/// failures performed no call at all.
pub struct StubPredictionEndpoint {
    calls: AtomicUsize,
    default_score: f64,
    scripted: Mutex<VecDeque<Result<f64, UpstreamError>>>,
    last_request: Mutex<Option<(Vec<FeatureVector>, String)>>,
}

impl StubPredictionEndpoint {
    pub fn with_score(default_score: f64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            default_score,
            scripted: Mutex::new(VecDeque::new()),
            last_request: Mutex::new(None),
        }
    }

    /// Queue a score for the next call.
    pub fn push_score(&self, score: f64) {
        self.scripted.lock().push_back(Ok(score));
    }

    /// Queue a failure for the next call.
    pub fn push_failure(&self, err: UpstreamError) {
        self.scripted.lock().push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Instances and bearer secret of the most recent call, if any.
    pub fn last_request(&self) -> Option<(Vec<FeatureVector>, String)> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl PredictionEndpoint for StubPredictionEndpoint {
    async fn predict(
        &self,
        instances: &[FeatureVector],
        token: &AccessToken,
    ) -> Result<Vec<f64>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some((instances.to_vec(), token.secret().to_string()));
        let score = match self.scripted.lock().pop_front() {
            Some(Ok(score)) => score,
            Some(Err(err)) => return Err(err),
            None => self.default_score,
        };
        Ok(vec![score; instances.len()])
    }
}
