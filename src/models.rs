use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request payload for the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub query: String,
}

/// Response payload for the search endpoint
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub answer: String,
}

/// Request payload for the chat endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

/// Response payload for the chat endpoint
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderStatus>,
}

/// Reachability of the answer provider, when one is in use
#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
            provider: None,
        }
    }

    pub fn with_provider(mut self, name: &str, healthy: bool) -> Self {
        let status = if healthy { "healthy" } else { "unhealthy" };
        self.provider = Some(ProviderStatus {
            name: name.to_string(),
            status: status.to_string(),
        });
        self
    }
}

impl SearchResponse {
    pub fn new(answer: String) -> Self {
        Self { answer }
    }
}

impl ChatResponse {
    pub fn new(response: String) -> Self {
        Self { response }
    }
}

/// Accepts any JSON value as text: null becomes empty, other non-strings their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
