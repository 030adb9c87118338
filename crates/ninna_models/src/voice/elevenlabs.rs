//! ElevenLabs multilingual text-to-speech adapter.

use async_trait::async_trait;
use ninna_core::{AudioClip, Language};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::VoiceDriver;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://api.elevenlabs.io";
const MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs named-voice synthesis adapter.
#[derive(Debug, Clone)]
pub struct ElevenLabsVoice {
    client: Client,
    api_key: String,
    default_voice: Option<String>,
}

impl ElevenLabsVoice {
    /// Create an adapter with an optional configured default voice.
    pub fn new(api_key: String, default_voice: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            default_voice,
        }
    }

    /// Voice used when the caller names none: the configured default,
    /// falling back to a language-appropriate stock voice.
    fn resolve_voice(&self, language: Language, requested: Option<&str>) -> String {
        if let Some(voice) = requested {
            return voice.to_string();
        }
        if let Some(voice) = &self.default_voice {
            return voice.clone();
        }
        match language {
            Language::Italian => "bella".to_string(),
            _ => "rachel".to_string(),
        }
    }
}

#[async_trait]
impl VoiceDriver for ElevenLabsVoice {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: Option<&str>,
    ) -> NinnaResult<AudioClip> {
        let voice_id = self.resolve_voice(language, voice);
        let url = format!("{}/v1/text-to-speech/{}", BASE_URL, voice_id);
        let body = json!({
            "text": text,
            "model_id": MODEL_ID,
            "voice_settings": {"stability": 0.4, "style": 0.4},
        });

        debug!(voice = %voice_id, "Sending ElevenLabs synthesis request");

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable("elevenlabs", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                provider: "elevenlabs".to_string(),
                status,
                message,
            })
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::malformed("elevenlabs", e.to_string()))?;

        if bytes.is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty("elevenlabs".into())).into(),
            );
        }

        Ok(AudioClip::new("audio/mpeg", bytes.to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "elevenlabs"
    }

    fn supports_named_voices(&self) -> bool {
        true
    }
}
