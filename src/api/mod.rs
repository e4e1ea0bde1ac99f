use std::time::Duration;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::record::{FeatureForm, Prediction, PredictionRecord};

pub const PREDICT_PATH: &str = "/predict";
pub const RECORDS_PATH: &str = "/users";
pub const CLEAR_PATH: &str = "/clear-db";

/// Fallback shown when the clear endpoint succeeds without a message body.
pub const CLEAR_FALLBACK_MESSAGE: &str = "Database cleared successfully.";

/// One variant per failure cause. All of them collapse into a single
/// human-readable status line at the call site; none propagate further and
/// none are retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server error: {status}")]
    Status { status: u16 },

    #[error("server error: {status}: malformed response body")]
    MalformedBody { status: u16 },

    #[error("{message}")]
    Application { message: String },
}

#[derive(Debug, Deserialize)]
struct PredictBody {
    #[serde(default)]
    prediction: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClearBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes a prediction response. A failure status prefers the body's
/// error field over the status-derived message; a success body may still
/// carry an application error.
pub fn decode_predict(status: u16, body: &[u8]) -> Result<Prediction, ApiError> {
    if !is_success(status) {
        if let Ok(parsed) = serde_json::from_slice::<PredictBody>(body) {
            if let Some(message) = parsed.error {
                return Err(ApiError::Application { message });
            }
        }
        return Err(ApiError::Status { status });
    }

    let parsed: PredictBody =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody { status })?;
    if let Some(message) = parsed.error {
        return Err(ApiError::Application { message });
    }
    Ok(Prediction::from_code(parsed.prediction))
}

pub fn decode_records(status: u16, body: &[u8]) -> Result<Vec<PredictionRecord>, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Status { status });
    }
    serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody { status })
}

pub fn decode_clear(status: u16, body: &[u8]) -> Result<String, ApiError> {
    if !is_success(status) {
        if let Ok(parsed) = serde_json::from_slice::<ClearBody>(body) {
            if let Some(message) = parsed.error {
                return Err(ApiError::Application { message });
            }
        }
        return Err(ApiError::Status { status });
    }

    let parsed: ClearBody =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody { status })?;
    if let Some(message) = parsed.error {
        return Err(ApiError::Application { message });
    }
    Ok(parsed
        .message
        .unwrap_or_else(|| CLEAR_FALLBACK_MESSAGE.to_string()))
}

/// HTTP client over the three service endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: usize) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(10));
        let http = reqwest::Client::builder()
            .user_agent(concat!("oncoview/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn predict(&self, form: &FeatureForm) -> Result<Prediction, ApiError> {
        debug!("sending prediction request for '{}'", form.username);
        let resp = self
            .http
            .post(self.endpoint(PREDICT_PATH))
            .json(form)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        decode_predict(status, &body)
    }

    /// Submits the form by value: it is consumed on success and handed
    /// back unconsumed on failure.
    pub async fn submit(&self, form: FeatureForm) -> Result<Prediction, (ApiError, FeatureForm)> {
        match self.predict(&form).await {
            Ok(prediction) => Ok(prediction),
            Err(e) => Err((e, form)),
        }
    }

    pub async fn list_records(&self) -> Result<Vec<PredictionRecord>, ApiError> {
        let resp = self.http.get(self.endpoint(RECORDS_PATH)).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        let records = decode_records(status, &body)?;
        debug!("received {} stored records", records.len());
        Ok(records)
    }

    pub async fn clear_records(&self) -> Result<String, ApiError> {
        let resp = self.http.post(self.endpoint(CLEAR_PATH)).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        decode_clear(status, &body)
    }
}
