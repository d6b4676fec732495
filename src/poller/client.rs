use async_trait::async_trait;
use reqwest::Client;

use super::HumiditySource;
use crate::config::PollerConfig;
use crate::error::ErrorBody;
use crate::humidity::HumidityResponse;
use crate::routes::auth::API_TOKEN_HEADER;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}: {message}")]
    Status { status: u16, message: String },
}

/// HTTP client for the `/humidity` endpoints.
pub struct HumidityClient {
    http_client: Client,
    base_url: String,
    api_token: String,
}

impl HumidityClient {
    /// # Errors
    ///
    /// Returns `ClientError::Request` if the HTTP client cannot be built.
    pub fn new(config: &PollerConfig) -> Result<Self, ClientError> {
        let http_client = Client::builder().build()?;

        Ok(Self {
            http_client,
            base_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Fetch the full reading history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or returns an error status.
    pub async fn list_humidity(&self) -> Result<Vec<HumidityResponse>, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/humidity", self.base_url))
            .header(&API_TOKEN_HEADER, &self.api_token)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Delete the whole reading history.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or returns an error status.
    pub async fn clear_humidity(&self) -> Result<(), ClientError> {
        let response = self
            .http_client
            .delete(format!("{}/humidity", self.base_url))
            .header(&API_TOKEN_HEADER, &self.api_token)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl HumiditySource for HumidityClient {
    async fn fetch_history(&self) -> Result<Vec<HumidityResponse>, ClientError> {
        self.list_humidity().await
    }

    async fn clear_history(&self) -> Result<(), ClientError> {
        self.clear_humidity().await
    }
}

/// Turn a non-success response into `ClientError::Status`, preferring the
/// server's error message over the raw body.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
