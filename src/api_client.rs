use crate::config::PortalConfig;
use crate::errors::ApiError;
use crate::models::{
    RegisterResponse, RegisterUserRequest, ScoreRequest, ScoreResult, UserProfile,
};
use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// JSON client for the scoring API.
///
/// Every endpoint is appended verbatim to a fixed base origin. There is no
/// retry and no caching; each call resolves to exactly one request.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin of the scoring API, e.g. `http://localhost:8000`.
    /// * `timeout` - Optional per-request timeout; `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Url::parse(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    /// Sends `payload` as JSON to `endpoint` and parses the JSON reply.
    ///
    /// # Returns
    ///
    /// * `Result<R, ApiError>` - The decoded body, or the transport, status or
    ///   decode failure.
    pub async fn post_json<B, R>(&self, endpoint: &str, payload: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_for(endpoint)?;
        tracing::info!("POST {}", url);

        let response = self.client.post(url).json(payload).send().await?;
        Self::read_json(response).await
    }

    /// Fetches `endpoint` and parses the JSON reply.
    pub async fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        let url = self.url_for(endpoint)?;
        tracing::info!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Scoring API returned {}: {}", status, error_text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(&error_text),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /register`
    pub async fn register(&self, req: &RegisterUserRequest) -> Result<RegisterResponse, ApiError> {
        self.post_json("/register", req).await
    }

    /// `POST /calculate-score`
    pub async fn calculate_score(&self, req: &ScoreRequest) -> Result<ScoreResult, ApiError> {
        self.post_json("/calculate-score", req).await
    }

    /// `GET /user/{id}`
    pub async fn get_user(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.get_json(&format!("/user/{}", id)).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/health").await
    }
}

/// Pulls the `detail` message out of an error body.
///
/// String details are returned as-is; structured details (lists of field
/// errors) are returned as compact JSON; non-JSON bodies are returned whole.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
