//! HTTP prediction endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use stuntzilla_core::error::UpstreamError;
use stuntzilla_core::traits::PredictionEndpoint;
use stuntzilla_core::types::{AccessToken, FeatureVector};

/// Client for the deployed prediction endpoint.
///
/// Posts `{"instances": [[f1..f6], ...]}` with a Bearer authorization
/// header and expects `{"predictions": [[score], ...]}` back, one inner row
/// per instance. The URL is built from deployment identifiers by
/// [`PredictionConfig::endpoint_url`](stuntzilla_core::config::PredictionConfig::endpoint_url).
pub struct HttpPredictionEndpoint {
    agent: ureq::Agent,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<FeatureVector>,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f64>>,
}

impl HttpPredictionEndpoint {
    pub fn new(agent: ureq::Agent, url: impl Into<String>) -> Self {
        Self {
            agent,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PredictionEndpoint for HttpPredictionEndpoint {
    async fn predict(
        &self,
        instances: &[FeatureVector],
        token: &AccessToken,
    ) -> Result<Vec<f64>, UpstreamError> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        let bearer = format!("Bearer {}", token.secret());
        let request = PredictRequest {
            instances: instances.to_vec(),
        };

        let result = tokio::task::spawn_blocking(move || {
            let payload = serde_json::to_value(&request)
                .map_err(|e| UpstreamError::MalformedResponse(format!("encode failure: {e}")))?;
            let response = agent
                .post(&url)
                .set("Content-Type", "application/json")
                .set("Authorization", &bearer)
                .set("Accept", "application/json")
                .send_json(payload)
                .map_err(|e| match e {
                    ureq::Error::Status(status, _) => UpstreamError::Status(status),
                    ureq::Error::Transport(t) => UpstreamError::Transport(t.to_string()),
                })?;
            let parsed: PredictResponse = serde_json::from_reader(response.into_reader())
                .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;
            parsed
                .predictions
                .iter()
                .map(|row| {
                    row.first().copied().ok_or_else(|| {
                        UpstreamError::MalformedResponse("empty prediction row".into())
                    })
                })
                .collect::<Result<Vec<f64>, UpstreamError>>()
        })
        .await
        .map_err(|e| UpstreamError::Transport(format!("prediction task failed: {e}")))?;

        if let Err(err) = &result {
            error!(error = %err, "prediction call failed");
        }
        result
    }
}
