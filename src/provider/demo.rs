use async_trait::async_trait;

use super::{AnswerProvider, ProviderError};

const DEMO_PREFIX: &str = "AI 응답 예시: ";

/// In-process placeholder for a model backend; prefixes the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

#[async_trait]
impl AnswerProvider for DemoProvider {
    async fn answer(&self, query: &str) -> Result<String, ProviderError> {
        Ok(format!("{DEMO_PREFIX}{query}"))
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
