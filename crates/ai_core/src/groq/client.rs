//! Groq client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ContentPart, ImageUrl,
    MessageContent, RequestMessage,
};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::ports::{
    CompletionProvider, CompletionRequest, CompletionResponse, ImageInput, TokenUsage,
    VisionProvider,
};

/// Primary completion provider backed by Groq
pub struct GroqClient {
    client: Client,
    config: ProviderConfig,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.config.base_url)
            .field("default_model", &self.config.default_model)
            .field("has_api_key", &self.config.api_key.is_some())
            .finish()
    }
}

impl GroqClient {
    /// Create a new client
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(ProviderError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Groq client"
        );

        Ok(Self { client, config })
    }

    fn resolve_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    async fn send(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let mut builder = self.client.post(self.config.completions_url()).json(body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Groq request failed");
            return Err(map_api_error(status, &body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))?;
        let content = choice.message.content.ok_or_else(|| {
            ProviderError::InvalidResponse("first choice has no content".to_string())
        })?;

        let usage = parsed.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, "Groq completion finished");

        Ok(CompletionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| body.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

fn map_api_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) if api.error.code.as_deref() == Some("model_not_found") => {
            ProviderError::ModelNotAvailable(api.error.message)
        }
        Ok(api) => ProviderError::from_status(status, api.error.message),
        Err(_) => ProviderError::from_status(status, body),
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        request.ensure_not_empty()?;

        let body = ChatCompletionRequest {
            model: self.resolve_model(&request).to_string(),
            messages: request
                .messages
                .iter()
                .map(|m| RequestMessage {
                    role: m.role.as_str(),
                    content: MessageContent::Text(m.content.clone()),
                })
                .collect(),
            temperature: request.temperature.or(Some(self.config.temperature)),
            max_tokens: request.max_tokens.or(self.config.max_tokens),
        };

        self.send(&body).await
    }

    fn provider_name(&self) -> &str {
        "groq"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[async_trait]
impl VisionProvider for GroqClient {
    #[instrument(skip(self, image, prompt), fields(model = %self.config.vision_model, mime = %image.mime_type))]
    async fn describe_image(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        if image.bytes.is_empty() {
            return Err(ProviderError::InvalidRequest("image is empty".to_string()));
        }

        let body = ChatCompletionRequest {
            model: self.config.vision_model.clone(),
            messages: vec![RequestMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ]),
            }],
            temperature: None,
            max_tokens: self.config.max_tokens,
        };

        self.send(&body).await
    }
}
