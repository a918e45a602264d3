use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AnswerProvider, ProviderError};

const THINK_CLOSE: &str = "</think>";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Answers queries through an Ollama server's `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Drops reasoning models' `<think>...</think>` preamble, up to the last closing tag.
fn strip_reasoning(text: &str) -> &str {
    match text.rfind(THINK_CLOSE) {
        Some(end) => text[end + THINK_CLOSE.len()..].trim(),
        None => text.trim(),
    }
}

#[async_trait]
impl AnswerProvider for OllamaProvider {
    async fn answer(&self, query: &str) -> Result<String, ProviderError> {
        let url = self.generate_url();
        info!("Calling Ollama model {} at {}", self.model, url);

        let request = GenerateRequest {
            model: &self.model,
            prompt: query,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        debug!("Ollama response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "Ollama returned {}: {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("invalid response body: {}", e)))?;

        let answer = strip_reasoning(&body.response);
        if answer.is_empty() {
            return Err(ProviderError::Unavailable(
                "Ollama returned an empty answer".to_string(),
            ));
        }

        Ok(answer.to_string())
    }

    /// Reachable when `/api/tags` answers with a success status
    async fn health(&self) -> bool {
        match self.client.get(self.tags_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Ollama health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
