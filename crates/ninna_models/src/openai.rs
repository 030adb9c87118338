//! OpenAI-compatible chat completions client.
//!
//! One client covers every endpoint that speaks the chat completions
//! dialect; the provider label and base URL are injected so compatible
//! services reuse the same wire code.

use async_trait::async_trait;
use ninna_core::{GenerateRequest, GenerateResponse, Role};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::StoryDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat completions API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    provider: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

impl OpenAiClient {
    /// Creates a new OpenAI client.
    ///
    /// Reads the API token from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not set.
    #[instrument(skip_all, fields(model = %model))]
    pub fn new(model: String) -> NinnaResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|e| {
            ProviderError::new(ProviderErrorKind::Misconfigured(format!(
                "OPENAI_API_KEY not set: {}",
                e
            )))
        })?;
        Ok(Self::with_api_key(
            api_key,
            model,
            DEFAULT_BASE_URL.to_string(),
            "openai",
        ))
    }

    /// Creates a client for any OpenAI-compatible endpoint.
    #[instrument(skip(api_key), fields(model = %model, provider = provider))]
    pub fn with_api_key(
        api_key: String,
        model: String,
        base_url: String,
        provider: &'static str,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
            provider,
        }
    }
}

#[async_trait]
impl StoryDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> NinnaResult<GenerateResponse> {
        let body = ChatRequest {
            model: req.model.as_deref().unwrap_or(&self.model),
            messages: req
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: role_label(m.role),
                    content: &m.content,
                })
                .collect(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        debug!(url = %self.base_url, "Sending chat completions request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(self.provider, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                provider: self.provider.to_string(),
                status,
                message,
            })
            .into());
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(self.provider, e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty(self.provider.to_string())).into(),
            );
        }

        debug!(response_length = text.len(), "Received chat completion");
        Ok(GenerateResponse::new(text))
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
