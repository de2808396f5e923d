//! Raw JSON completion provider
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint with an
//! untyped body. Used as the secondary provider (OpenRouter by default).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::ports::{CompletionProvider, CompletionRequest, CompletionResponse, TokenUsage};

/// Secondary completion provider using hand-built JSON
pub struct HttpJsonProvider {
    client: Client,
    config: ProviderConfig,
    name: String,
}

impl std::fmt::Debug for HttpJsonProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpJsonProvider")
            .field("name", &self.name)
            .field("base_url", &self.config.base_url)
            .field("default_model", &self.config.default_model)
            .finish_non_exhaustive()
    }
}

impl HttpJsonProvider {
    /// Create a new provider named `openrouter`
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Self::named("openrouter", config)
    }

    /// Create a new provider with a custom log name
    pub fn named(name: impl Into<String>, config: ProviderConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(ProviderError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        let name = name.into();
        info!(
            provider = %name,
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized HTTP JSON provider"
        );

        Ok(Self {
            client,
            config,
            name,
        })
    }

    fn build_body(&self, request: &CompletionRequest, model: &str) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": request.temperature.unwrap_or(self.config.temperature),
        });
        if let Some(max_tokens) = request.max_tokens.or(self.config.max_tokens) {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }
}

/// Pull `choices[0].message.content` out of a response body
fn extract_content(body: &Value) -> Result<String, ProviderError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing choices[0].message.content".to_string())
        })
}

fn extract_usage(body: &Value) -> Option<TokenUsage> {
    let usage = body.get("usage")?;
    let field = |name: &str| {
        usage
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    };
    Some(TokenUsage {
        prompt_tokens: field("prompt_tokens")?,
        completion_tokens: field("completion_tokens")?,
        total_tokens: field("total_tokens")?,
    })
}

#[async_trait]
impl CompletionProvider for HttpJsonProvider {
    #[instrument(skip(self, request), fields(provider = %self.name))]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        request.ensure_not_empty()?;

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());
        let body = self.build_body(&request, &model);

        let mut builder = self.client.post(self.config.completions_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "HTTP JSON provider request failed");
            return Err(ProviderError::from_status(status, text));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let content = extract_content(&payload)?;
        let usage = extract_usage(&payload);
        debug!(tokens = ?usage, "HTTP JSON completion finished");

        Ok(CompletionResponse {
            content,
            model: payload
                .get("model")
                .and_then(Value::as_str)
                .map_or(model, str::to_string),
            usage,
            finish_reason: payload
                .pointer("/choices/0/finish_reason")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
