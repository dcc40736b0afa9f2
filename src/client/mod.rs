pub mod wire;

use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::{config::GeminiConfig, error::ReplyError};

use wire::GenerateContentRequest;

/// Thin client over the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, ReplyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ReplyError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Sends `prompt` and returns the raw JSON body of a successful response.
    pub async fn generate(&self, prompt: &str) -> Result<String, ReplyError> {
        tracing::debug!(
            "Sending generateContent request to {} ({} prompt bytes)",
            self.endpoint,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!("Generation API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Generation API request failed with status {}: {}", status, body);
            return Err(ReplyError::Http { status, body });
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> ReplyError {
        // reqwest embeds the request URL, which carries the key
        let e = e.without_url();
        if e.is_timeout() {
            tracing::error!("Generation API timed out after {:?}", self.timeout);
            ReplyError::Timeout(self.timeout)
        } else {
            tracing::error!("Failed to reach generation API: {}", e);
            ReplyError::Network(e)
        }
    }
}
