//! Murf.ai studio-voice synthesis adapter.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ninna_core::{AudioClip, Language};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::VoiceDriver;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://api.murf.ai/v1";

/// Murf.ai synthesis adapter with a single configured voice.
#[derive(Debug, Clone)]
pub struct MurfVoice {
    client: Client,
    api_key: String,
    voice_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MurfResponse {
    audio_file: Option<String>,
}

impl MurfVoice {
    /// Create an adapter bound to one configured Murf voice.
    pub fn new(api_key: String, voice_id: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            voice_id,
        }
    }
}

#[async_trait]
impl VoiceDriver for MurfVoice {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        _voice: Option<&str>,
    ) -> NinnaResult<AudioClip> {
        let body = json!({
            "voiceId": self.voice_id,
            "text": text,
            "rate": 0,
            "pitch": 0,
            "sampleRate": 48000,
            "format": "MP3",
            "channelType": "STEREO",
            "pronunciationDictionary": {},
            "encodeAsBase64": true,
        });

        debug!(voice = %self.voice_id, %language, "Sending Murf synthesis request");

        let response = self
            .client
            .post(format!("{}/text-to-speech", BASE_URL))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable("murf", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                provider: "murf".to_string(),
                status,
                message,
            })
            .into());
        }

        let parsed: MurfResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed("murf", e.to_string()))?;

        let encoded = parsed
            .audio_file
            .ok_or_else(|| ProviderError::malformed("murf", "response missing audioFile"))?;

        let data = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ProviderError::malformed("murf", e.to_string()))?;

        if data.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::Empty("murf".into())).into());
        }

        Ok(AudioClip::new("audio/mpeg", data))
    }

    fn provider_name(&self) -> &'static str {
        "murf"
    }
}
