//! HTTP client for OpenAI-compatible chat-completion endpoints.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{ChatCompletion, ChatRequest, ChatResponse, LlmConfig};
use crate::error::{Error, Result};

/// Chat-completion client backed by `reqwest`.
#[derive(Clone)]
pub struct OpenAiClient {
    /// Base URL, without trailing slash
    base_url: String,
    /// Bearer token
    api_key: Option<String>,
    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client from config. Does not contact the endpoint.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            client,
        })
    }

    /// Full URL of the completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>> {
        let api_key = self.api_key.as_ref().ok_or(Error::LlmNotConfigured)?;

        let url = self.completions_url();
        debug!("LLM request: POST {} (model {})", url, request.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("API error {}: {}", status, error_text)));
        }

        let body: ChatResponse = resp.json().await?;
        Ok(body.into_content())
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
