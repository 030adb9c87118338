//! HuggingFace Inference API text-to-speech adapter.

use async_trait::async_trait;
use ninna_core::{AudioClip, Language};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::VoiceDriver;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// HuggingFace TTS model adapter.
#[derive(Debug, Clone)]
pub struct HuggingFaceVoice {
    client: Client,
    api_key: String,
    model: String,
}

impl HuggingFaceVoice {
    /// Create an adapter for one hosted TTS model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl VoiceDriver for HuggingFaceVoice {
    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.model))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        _voice: Option<&str>,
    ) -> NinnaResult<AudioClip> {
        let url = format!("{}/{}", BASE_URL, self.model);
        let body = json!({
            "inputs": text,
            "options": {"wait_for_model": true},
        });

        debug!(url = %url, %language, "Sending HuggingFace TTS request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "audio/wav")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable("huggingface-tts", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                provider: "huggingface-tts".to_string(),
                status,
                message,
            })
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::malformed("huggingface-tts", e.to_string()))?;

        if bytes.is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty("huggingface-tts".into())).into(),
            );
        }

        Ok(AudioClip::new("audio/wav", bytes.to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "huggingface-tts"
    }
}
