//! Free language-keyed synthesis via the Google Translate TTS endpoint.
//!
//! No API key; the endpoint caps each request around 200 characters, so
//! long narrations are split on whitespace and the MP3 frames of each
//! chunk concatenated.

use async_trait::async_trait;
use ninna_core::{AudioClip, Language};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::VoiceDriver;
use reqwest::Client;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://translate.google.com/translate_tts";
const MAX_CHUNK_CHARS: usize = 200;

/// Keyless language-default synthesis adapter.
#[derive(Debug, Clone)]
pub struct TranslateVoice {
    client: Client,
}

impl TranslateVoice {
    /// Create the adapter.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Split text into whitespace-bounded chunks the endpoint accepts.
    fn chunk_text(text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if !current.is_empty()
                && current.chars().count() + 1 + word.chars().count() > MAX_CHUNK_CHARS
            {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

impl Default for TranslateVoice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceDriver for TranslateVoice {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        _voice: Option<&str>,
    ) -> NinnaResult<AudioClip> {
        let chunks = Self::chunk_text(text);
        if chunks.is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty("translate".into())).into(),
            );
        }

        debug!(chunks = chunks.len(), "Fetching translate TTS chunks");

        let mut data = Vec::new();
        for chunk in &chunks {
            let response = self
                .client
                .get(BASE_URL)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", language.code()),
                    ("q", chunk.as_str()),
                ])
                .send()
                .await
                .map_err(|e| ProviderError::unavailable("translate", e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::new(ProviderErrorKind::Api {
                    provider: "translate".to_string(),
                    status,
                    message,
                })
                .into());
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ProviderError::malformed("translate", e.to_string()))?;
            data.extend_from_slice(&bytes);
        }

        if data.is_empty() {
            return Err(
                ProviderError::new(ProviderErrorKind::Empty("translate".into())).into(),
            );
        }

        Ok(AudioClip::new("audio/mpeg", data))
    }

    fn provider_name(&self) -> &'static str {
        "translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_respect_length_cap() {
        let text = "parola ".repeat(100);
        let chunks = TranslateVoice::chunk_text(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = TranslateVoice::chunk_text("Buona notte, Sofia.");
        assert_eq!(chunks, vec!["Buona notte, Sofia.".to_string()]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(TranslateVoice::chunk_text("   ").is_empty());
    }
}
