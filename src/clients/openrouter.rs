use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::clients::model::{CompletionProvider, CompletionRequest, ProviderError};
use crate::core::error::GatewayError;
use crate::infra::config::ProviderConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::make_http_client_with;

pub const PROVIDER_NAME: &str = "OpenRouter";

/// OpenRouter chat-completions backend. One POST per completion, no retries.
#[derive(Clone)]
pub struct OpenRouterRemote {
    base: String,
    api_key: String,
    http: Client,
}

impl OpenRouterRemote {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        Self::from_config(
            &ProviderConfig { base_url: base.into(), ..ProviderConfig::default() },
            api_key,
        )
    }

    pub fn from_config(cfg: &ProviderConfig, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let http = make_http_client_with(cfg)?;
        Ok(Self { base: cfg.base_url.clone(), api_key: api_key.into(), http })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterRemote {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let url = self.endpoint();
        let req_id = generate_request_id();
        tracing::debug!(endpoint = %url, request_id = %req_id, model = %request.model, "openrouter.complete request");

        let payload = ChatReq {
            model: &request.model,
            messages: [ChatMsg { role: "user", content: &request.prompt }],
            temperature: request.temperature,
        };
        let (builder, _rid) = add_standard_headers(self.http.post(url), Some(req_id));
        let resp = builder
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), body_len = body.len(), "openrouter.complete response");

        if !status.is_success() {
            return Err(ProviderError::Status { status: status.as_u16(), message: error_message(&body) });
        }

        let parsed: ChatResp =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        // OpenRouter sometimes reports upstream failures inside a 200 body.
        if let Some(err) = parsed.error {
            return Err(ProviderError::Other(err.message));
        }
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("response has no message content".into()))
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorWire>(body) {
        Ok(w) => w.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".into(),
        Err(_) => body.trim().to_owned(),
    }
}

#[derive(Serialize)]
struct ChatMsg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatReq<'a> {
    model: &'a str,
    messages: [ChatMsg<'a>; 1],
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResp {
    #[serde(default)]
    choices: Vec<ChoiceWire>,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ChoiceWire {
    message: MessageWire,
}

#[derive(Deserialize)]
struct MessageWire {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWire {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}
