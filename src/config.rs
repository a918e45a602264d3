use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderKind;
use crate::resolver::ResolveMode;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILTER: &str = "rs_answer_svc=info,tower_http=debug";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("unknown resolve mode {0:?} (expected table, fallback or provider)")]
    InvalidResolveMode(String),
    #[error("unknown answer provider {0:?} (expected ollama or demo)")]
    InvalidProvider(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Topic table JSON; the built-in table is used when unset
    pub topics_file: Option<PathBuf>,
    pub resolve_mode: ResolveMode,
    pub provider: ProviderKind,
    pub ollama_url: String,
    pub ollama_model: String,
    pub provider_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let timeout_ms = match lookup("PROVIDER_TIMEOUT_MS") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "PROVIDER_TIMEOUT_MS",
                value,
            })?,
            None => DEFAULT_PROVIDER_TIMEOUT_MS,
        };

        let resolve_mode = match lookup("RESOLVE_MODE") {
            Some(value) => value.parse()?,
            None => ResolveMode::default(),
        };

        let provider = match lookup("ANSWER_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::default(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            topics_file: lookup("TOPICS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            resolve_mode,
            provider,
            ollama_url: lookup("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: lookup("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            provider_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_FILTER.to_string(),
            topics_file: None,
            resolve_mode: ResolveMode::default(),
            provider: ProviderKind::default(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }
}
