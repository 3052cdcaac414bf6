use crate::models::{Prediction, UpstreamRequest};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("could not reach the inference endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference endpoint answered with status {0}")]
    Status(u16),
    #[error("inference endpoint returned a malformed body: {0}")]
    Malformed(#[source] reqwest::Error),
    #[error("inference endpoint returned an invalid confidence {0}")]
    InvalidConfidence(f64),
    #[error("inference endpoint returned an empty class label")]
    EmptyLabel,
}

/// Client for the remote `/predict` endpoint.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn predict(&self, image_base64: &str) -> Result<Prediction, InferenceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&UpstreamRequest { image_base64 })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("inference endpoint returned {status}");
            return Err(InferenceError::Status(status.as_u16()));
        }

        let prediction: Prediction = response.json().await.map_err(body_error)?;
        validate(prediction)
    }
}

fn body_error(err: reqwest::Error) -> InferenceError {
    if err.is_decode() {
        InferenceError::Malformed(err)
    } else {
        InferenceError::Transport(err)
    }
}

fn validate(mut prediction: Prediction) -> Result<Prediction, InferenceError> {
    if !prediction.confidence.is_finite() || !(0.0..=1.0).contains(&prediction.confidence) {
        return Err(InferenceError::InvalidConfidence(prediction.confidence));
    }
    let label = prediction.class.trim();
    if label.is_empty() {
        return Err(InferenceError::EmptyLabel);
    }
    if label.len() != prediction.class.len() {
        prediction.class = label.to_string();
    }
    Ok(prediction)
}
