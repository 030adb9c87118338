//! Cascading gateway over the speech drivers.

use ninna_core::{AudioClip, Language};
use ninna_interface::VoiceDriver;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Result of the synthesis cascade.
///
/// Absent audio is an outcome, not an error: a story without narration
/// still ships.
#[derive(Debug, Clone, Default)]
pub struct AudioOutcome {
    /// Encoded narration audio, when any step produced some.
    pub clip: Option<AudioClip>,
    /// Voice or provider label that produced the clip.
    pub voice: Option<String>,
}

/// Walks the synthesis cascade in a fixed order.
///
/// 1. the named-voice adapter with the caller's requested voice;
/// 2. the free language-keyed adapter;
/// 3. the named-voice adapter with the language-default voice;
/// 4. premium adapters in configured order;
/// 5. absent audio.
pub struct VoiceGateway {
    named: Option<Arc<dyn VoiceDriver>>,
    free: Option<Arc<dyn VoiceDriver>>,
    premium: Vec<Arc<dyn VoiceDriver>>,
    voice_map: HashMap<Language, String>,
    timeout: Duration,
}

impl VoiceGateway {
    /// Build a gateway from the configured adapters.
    ///
    /// Any adapter slot may be empty; an entirely empty gateway simply
    /// produces absent audio.
    pub fn new(
        named: Option<Arc<dyn VoiceDriver>>,
        free: Option<Arc<dyn VoiceDriver>>,
        premium: Vec<Arc<dyn VoiceDriver>>,
        voice_map: HashMap<Language, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            named,
            free,
            premium,
            voice_map,
            timeout,
        }
    }

    /// Run the cascade for one narration text.
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    pub async fn synthesize(
        &self,
        text: &str,
        language: Language,
        requested_voice: Option<&str>,
    ) -> AudioOutcome {
        if let (Some(named), Some(voice)) = (&self.named, requested_voice) {
            if let Some(clip) = self.attempt(named.as_ref(), text, language, Some(voice)).await {
                return AudioOutcome {
                    clip: Some(clip),
                    voice: Some(voice.to_string()),
                };
            }
        }

        if let Some(free) = &self.free {
            if let Some(clip) = self.attempt(free.as_ref(), text, language, None).await {
                return AudioOutcome {
                    clip: Some(clip),
                    voice: Some(free.provider_name().to_string()),
                };
            }
        }

        if let Some(named) = &self.named {
            let default_voice = self.voice_map.get(&language).map(String::as_str);
            if let Some(clip) = self
                .attempt(named.as_ref(), text, language, default_voice)
                .await
            {
                let voice = default_voice
                    .map(str::to_string)
                    .unwrap_or_else(|| named.provider_name().to_string());
                return AudioOutcome {
                    clip: Some(clip),
                    voice: Some(voice),
                };
            }
        }

        for premium in &self.premium {
            if let Some(clip) = self.attempt(premium.as_ref(), text, language, None).await {
                return AudioOutcome {
                    clip: Some(clip),
                    voice: Some(premium.provider_name().to_string()),
                };
            }
        }

        debug!("No synthesis step produced audio");
        AudioOutcome::default()
    }

    /// One bounded attempt; every failure mode collapses to `None`.
    async fn attempt(
        &self,
        driver: &dyn VoiceDriver,
        text: &str,
        language: Language,
        voice: Option<&str>,
    ) -> Option<AudioClip> {
        let provider = driver.provider_name();
        match tokio::time::timeout(self.timeout, driver.synthesize(text, language, voice)).await {
            Ok(Ok(clip)) if !clip.is_empty() => {
                debug!(provider, bytes = clip.data.len(), "Synthesis succeeded");
                Some(clip)
            }
            Ok(Ok(_)) => {
                warn!(provider, "Synthesis returned empty audio");
                None
            }
            Ok(Err(e)) => {
                warn!(provider, error = %e, "Synthesis failed");
                None
            }
            Err(_) => {
                warn!(
                    provider,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Synthesis timed out"
                );
                None
            }
        }
    }
}
