//! Prediction endpoint trait.

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::types::{AccessToken, FeatureVector};

/// Remote prediction endpoint.
///
/// Wire shape: JSON request `{"instances": [[f1..f6]]}` over an
/// authenticated call, JSON response `{"predictions": [[score]]}`. The
/// prediction proxy always submits a single-instance batch, but the trait
/// accepts a slice so batch callers need no second seam.
#[async_trait]
pub trait PredictionEndpoint: Send + Sync {
    /// Submit feature vectors and return one scalar score per instance.
    ///
    /// # Errors
    /// - `UpstreamError::Transport` - Endpoint unreachable
    /// - `UpstreamError::Status` - Non-2xx response
    /// - `UpstreamError::MalformedResponse` - Body missing the expected
    ///   predictions shape
    async fn predict(
        &self,
        instances: &[FeatureVector],
        token: &AccessToken,
    ) -> Result<Vec<f64>, UpstreamError>;
}
