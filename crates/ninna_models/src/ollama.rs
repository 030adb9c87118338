//! Ollama client for local model execution.

use async_trait::async_trait;
use ninna_core::{GenerateRequest, GenerateResponse};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::StoryDriver;
use ollama_rs::Ollama;
use ollama_rs::generation::completion::request::GenerationRequest as OllamaRequest;
use tracing::{debug, info, instrument, warn};

/// Ollama client for local model execution.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Ollama,
    model_name: String,
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client with default localhost connection.
    #[instrument(name = "ollama_client_new")]
    pub fn new(model_name: impl Into<String> + std::fmt::Debug) -> Self {
        Self::new_with_url(model_name, "http://localhost:11434")
    }

    /// Create a new Ollama client with custom server URL.
    #[instrument(name = "ollama_client_new_with_url")]
    pub fn new_with_url(
        model_name: impl Into<String> + std::fmt::Debug,
        base_url: impl Into<String> + std::fmt::Debug,
    ) -> Self {
        let model_name = model_name.into();
        let base_url = base_url.into();

        info!(model = %model_name, url = %base_url, "Creating Ollama client");

        let client = Ollama::new(base_url.clone(), 11434);

        Self {
            client,
            model_name,
            base_url,
        }
    }

    /// Check if the Ollama server is running and the model is available.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> NinnaResult<()> {
        debug!("Validating Ollama server and model availability");

        match self.client.list_local_models().await {
            Ok(models) => {
                let model_exists = models.iter().any(|m| m.name == self.model_name);
                if !model_exists {
                    warn!(
                        model = %self.model_name,
                        available = ?models.iter().map(|m| &m.name).collect::<Vec<_>>(),
                        "Model not found locally"
                    );
                    return Err(ProviderError::new(ProviderErrorKind::Misconfigured(
                        format!("Ollama model '{}' not found locally", self.model_name),
                    ))
                    .into());
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, url = %self.base_url, "Failed to connect to Ollama server");
                Err(ProviderError::unavailable("ollama", e.to_string()).into())
            }
        }
    }
}

#[async_trait]
impl StoryDriver for OllamaClient {
    #[instrument(skip(self, req), fields(model = %self.model_name))]
    async fn generate(&self, req: &GenerateRequest) -> NinnaResult<GenerateResponse> {
        // Ollama's completion endpoint takes one flat prompt.
        let prompt = req.flat_prompt();
        debug!(prompt_length = prompt.len(), "Generating with Ollama");

        let ollama_req = OllamaRequest::new(self.model_name.clone(), prompt);

        let response = self
            .client
            .generate(ollama_req)
            .await
            .map_err(|e| ProviderError::unavailable("ollama", e.to_string()))?;

        if response.response.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::Empty("ollama".into())).into());
        }

        debug!(
            response_length = response.response.len(),
            "Received response from Ollama"
        );
        Ok(GenerateResponse::new(response.response))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
