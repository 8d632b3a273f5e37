//! Model client: nickname resolution plus one provider round-trip per call.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::error::InvocationError;
use crate::domain::models::ModelRegistry;

/// One completion request, built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub prompt: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

/// Backend abstraction so the model client can talk to a real API or a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-facing provider name, used as the error prefix.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

#[derive(Clone)]
pub struct ModelClient {
    registry: &'static ModelRegistry,
    provider: Arc<dyn CompletionProvider>,
}

impl ModelClient {
    pub fn new<P: CompletionProvider + 'static>(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    pub fn from_arc(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { registry: ModelRegistry::builtin(), provider }
    }

    pub fn registry(&self) -> &'static ModelRegistry {
        self.registry
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve `nickname`, then send `prompt` at `temperature`. An unknown
    /// nickname never reaches the provider.
    pub async fn call(
        &self,
        prompt: &str,
        nickname: &str,
        temperature: f64,
    ) -> Result<String, InvocationError> {
        let entry = self.registry.resolve(nickname)?;
        let request = CompletionRequest {
            model: entry.provider_model_id.to_owned(),
            temperature,
            prompt: prompt.to_owned(),
        };
        tracing::debug!(
            model = entry.nickname,
            provider_model = entry.provider_model_id,
            temperature,
            prompt_len = prompt.len(),
            "model call"
        );

        let start = Instant::now();
        let res = self.provider.complete(&request).await;
        let elapsed_ms = start.elapsed().as_millis() as f64;

        match res {
            Ok(text) => {
                metrics::histogram!("provider_latency_ms", "model" => entry.nickname).record(elapsed_ms);
                tracing::debug!(model = entry.nickname, response_len = text.len(), elapsed_ms, "model response");
                Ok(text)
            }
            Err(e) => {
                metrics::counter!("provider_errors_total", "model" => entry.nickname).increment(1);
                tracing::error!(
                    model = entry.nickname,
                    provider = self.provider.name(),
                    error = ?e,
                    elapsed_ms,
                    "provider call failed"
                );
                Err(InvocationError::Provider {
                    provider: self.provider.name().to_owned(),
                    message: e.to_string(),
                })
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubProvider;
    use super::*;

    #[tokio::test]
    async fn resolves_nickname_and_returns_text_unmodified() {
        let stub = StubProvider::echo();
        let client = ModelClient::new(stub.clone());
        let out = client.call("  keep\n whitespace ", "Opus", 0.4).await.unwrap();
        assert_eq!(out, "  keep\n whitespace ");

        let req = stub.last_request().unwrap();
        assert_eq!(req.model, "anthropic/claude-opus-4");
        assert_eq!(req.temperature, 0.4);
    }

    #[tokio::test]
    async fn unknown_model_never_reaches_provider() {
        let stub = StubProvider::echo();
        let client = ModelClient::new(stub.clone());
        let err = client.call("hi", "GPT-5", 0.5).await.unwrap_err();
        assert!(matches!(err, InvocationError::UnknownModel { .. }));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_wrapped_with_provider_name() {
        let client = ModelClient::new(StubProvider::failing("connection reset"));
        let err = client.call("hi", "Gemini", 0.5).await.unwrap_err();
        assert_eq!(err.to_string(), "Stub API error: connection reset");
    }
}
