pub mod demo;
pub mod ollama;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, ConfigError};
pub use demo::DemoProvider;
pub use ollama::OllamaProvider;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("answer provider unavailable: {0}")]
    Unavailable(String),
    #[error("answer provider timed out after {0:?}")]
    Timeout(Duration),
}

/// An external source of answers that may stand in for, or back up, the topic table
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer(&self, query: &str) -> Result<String, ProviderError>;

    /// Whether the backend looks reachable; in-process providers always are
    async fn health(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Ollama,
    Demo,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "demo" => Ok(Self::Demo),
            _ => Err(ConfigError::InvalidProvider(s.to_string())),
        }
    }
}

pub fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn AnswerProvider>> {
    let provider: Arc<dyn AnswerProvider> = match config.provider {
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
        )?),
        ProviderKind::Demo => Arc::new(DemoProvider),
    };
    Ok(provider)
}
