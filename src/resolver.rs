use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ConfigError;
use crate::provider::{AnswerProvider, ProviderError};
use crate::topics::TopicTable;

/// How the topic table and the answer provider are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Topic table only
    #[default]
    Table,
    /// Topic table first, provider for unmatched queries
    Fallback,
    /// Provider for every query
    Provider,
}

impl FromStr for ResolveMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "fallback" => Ok(Self::Fallback),
            "provider" => Ok(Self::Provider),
            _ => Err(ConfigError::InvalidResolveMode(s.to_string())),
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Fallback => "fallback",
            Self::Provider => "provider",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Topic,
    Provider,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub answer: String,
    pub source: AnswerSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderHealth {
    pub name: &'static str,
    pub healthy: bool,
}

/// Turns a query into an answer. Always produces one: provider failures and
/// timeouts end in the table's default answer.
#[derive(Clone)]
pub struct QueryResolver {
    table: Arc<TopicTable>,
    provider: Option<Arc<dyn AnswerProvider>>,
    mode: ResolveMode,
    timeout: Duration,
}

impl QueryResolver {
    /// Table-only resolver
    pub fn new(table: Arc<TopicTable>) -> Self {
        Self {
            table,
            provider: None,
            mode: ResolveMode::Table,
            timeout: Duration::from_millis(crate::config::DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }

    pub fn with_provider(
        mut self,
        provider: Arc<dyn AnswerProvider>,
        mode: ResolveMode,
        timeout: Duration,
    ) -> Self {
        self.provider = Some(provider);
        self.mode = mode;
        self.timeout = timeout;
        self
    }

    pub fn mode(&self) -> ResolveMode {
        if self.provider.is_some() {
            self.mode
        } else {
            ResolveMode::Table
        }
    }

    pub fn table(&self) -> &TopicTable {
        &self.table
    }

    /// The provider consulted by `resolve`, if the mode uses one
    fn active_provider(&self) -> Option<&Arc<dyn AnswerProvider>> {
        match (&self.provider, self.mode) {
            (Some(provider), ResolveMode::Fallback | ResolveMode::Provider) => Some(provider),
            _ => None,
        }
    }

    /// Health of the active provider, bounded by the provider timeout. `None` in table mode.
    pub async fn provider_health(&self) -> Option<ProviderHealth> {
        let provider = self.active_provider()?;
        let healthy = tokio::time::timeout(self.timeout, provider.health())
            .await
            .unwrap_or(false);
        Some(ProviderHealth {
            name: provider.name(),
            healthy,
        })
    }

    pub async fn resolve(&self, query: &str) -> Resolution {
        let Some(provider) = self.active_provider() else {
            return self.resolve_from_table(query);
        };

        if self.mode == ResolveMode::Fallback {
            if let Some(answer) = self.table.lookup(query) {
                return Self::topic(answer);
            }
        }

        match self.ask_provider(provider.as_ref(), query).await {
            Ok(answer) => Resolution {
                answer,
                source: AnswerSource::Provider,
            },
            Err(e) => {
                warn!(
                    "Provider {} failed, using default answer: {}",
                    provider.name(),
                    e
                );
                self.default_answer()
            }
        }
    }

    fn resolve_from_table(&self, query: &str) -> Resolution {
        match self.table.lookup(query) {
            Some(answer) => Self::topic(answer),
            None => {
                debug!("No topic matched, using default answer");
                self.default_answer()
            }
        }
    }

    async fn ask_provider(
        &self,
        provider: &dyn AnswerProvider,
        query: &str,
    ) -> Result<String, ProviderError> {
        tokio::time::timeout(self.timeout, provider.answer(query))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
    }

    fn topic(answer: &str) -> Resolution {
        Resolution {
            answer: answer.to_string(),
            source: AnswerSource::Topic,
        }
    }

    fn default_answer(&self) -> Resolution {
        Resolution {
            answer: self.table.default_answer().to_string(),
            source: AnswerSource::Default,
        }
    }
}

impl fmt::Debug for QueryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResolver")
            .field("topics", &self.table.len())
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("mode", &self.mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}
