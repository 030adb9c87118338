//! HuggingFace Inference API client.

use async_trait::async_trait;
use ninna_core::{GenerateRequest, GenerateResponse};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::StoryDriver;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// HuggingFace Inference API client for text generation.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    return_full_text: bool,
}

impl HuggingFaceClient {
    /// Creates a new HuggingFace client.
    ///
    /// Reads the API token from the `HUGGINGFACE_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not set.
    #[instrument(skip_all, fields(model = %model))]
    pub fn new(model: String) -> NinnaResult<Self> {
        let api_key = std::env::var("HUGGINGFACE_API_KEY").map_err(|e| {
            ProviderError::new(ProviderErrorKind::Misconfigured(format!(
                "HUGGINGFACE_API_KEY not set: {}",
                e
            )))
        })?;
        Ok(Self::with_api_key(api_key, model))
    }

    /// Creates a new HuggingFace client with a specific API key.
    #[instrument(skip_all, fields(model = %model))]
    pub fn with_api_key(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// The inference API answers with either a list of generations or a
    /// bare object depending on the model task; accept both.
    fn extract_generated_text(value: &Value) -> Option<String> {
        match value {
            Value::Array(items) => items.first().and_then(Self::extract_generated_text),
            Value::Object(map) => map
                .get("generated_text")
                .and_then(Value::as_str)
                .map(str::to_string),
            Value::String(text) => Some(text.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl StoryDriver for HuggingFaceClient {
    #[instrument(skip(self, req), fields(model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> NinnaResult<GenerateResponse> {
        let prompt = req.flat_prompt();
        let body = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_new_tokens: req.max_tokens,
                temperature: req.temperature,
                return_full_text: false,
            },
        };

        let url = format!("{}/{}", self.base_url, self.model);
        debug!(url = %url, "Sending HuggingFace inference request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable("huggingface", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                provider: "huggingface".to_string(),
                status,
                message,
            })
            .into());
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed("huggingface", e.to_string()))?;

        let text = Self::extract_generated_text(&parsed).ok_or_else(|| {
            ProviderError::malformed("huggingface", "no generated_text in response")
        })?;

        if text.trim().is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty("huggingface".into())).into(),
            );
        }

        Ok(GenerateResponse::new(text))
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
