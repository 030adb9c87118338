//! Engine wiring from configuration and environment.

use ninna_engine::{
    NinnaConfig, StoryEngine, SummaryExtractor, TextGateway, VoiceGateway,
};
use ninna_error::{EngineError, EngineErrorKind, NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::{StoryDriver, VoiceDriver};
use ninna_models::{
    ElevenLabsVoice, HuggingFaceClient, HuggingFaceVoice, MurfVoice, OllamaClient, OpenAiClient,
    TranslateVoice,
};
use ninna_quota::{MemoryQuotaStore, QuotaLedger};
use ninna_safety::Sanitizer;
use ninna_storage::{MemoryAuditSink, MemoryRepository};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Wire a [`StoryEngine`] from configuration and ambient credentials.
///
/// The active text provider comes from `config.provider.active`; its
/// API key, where one is needed, comes from the environment. Speech
/// adapters are attached for every credential that is present and
/// skipped for every one that is not, so a keyless deployment still
/// builds an engine that narrates nothing but never fails.
///
/// # Errors
///
/// Returns an error when the active provider is unknown or its
/// credential is missing. Absent voice credentials are not errors.
#[instrument(skip(config), fields(provider = %config.provider.active))]
pub fn build_engine(config: &NinnaConfig) -> NinnaResult<StoryEngine> {
    let drivers = text_drivers(config)?;
    let timeout = config.provider.timeout();

    Ok(StoryEngine::new(
        Arc::new(MemoryRepository::new()),
        Arc::new(MemoryAuditSink::new()),
        QuotaLedger::new(
            Arc::new(MemoryQuotaStore::new()),
            config.quota.daily_max,
            config.quota.premium,
        ),
        TextGateway::new(drivers.clone(), timeout),
        voice_gateway(config),
        SummaryExtractor::new(drivers, timeout),
        Sanitizer::new(&config.safety.replacement_table())?,
    ))
}

/// The text driver chain for the configured active provider.
///
/// "stub" yields an empty chain; the gateway's built-in fallback then
/// serves every request.
fn text_drivers(config: &NinnaConfig) -> NinnaResult<Vec<Arc<dyn StoryDriver>>> {
    let provider = &config.provider;
    let drivers: Vec<Arc<dyn StoryDriver>> = match provider.active.as_str() {
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|e| {
                ProviderError::new(ProviderErrorKind::Misconfigured(format!(
                    "OPENAI_API_KEY not set: {}",
                    e
                )))
            })?;
            vec![Arc::new(OpenAiClient::with_api_key(
                api_key,
                provider.openai_model.clone(),
                provider.openai_base_url.clone(),
                "openai",
            ))]
        }
        "ollama" => {
            vec![Arc::new(OllamaClient::new_with_url(
                provider.ollama_model.clone(),
                provider.ollama_url.clone(),
            ))]
        }
        "huggingface" => {
            vec![Arc::new(HuggingFaceClient::new(
                provider.huggingface_model.clone(),
            )?)]
        }
        "stub" => {
            info!("No text provider configured, every story will use the bundled payload");
            vec![]
        }
        other => {
            return Err(EngineError::new(EngineErrorKind::Misconfigured(format!(
                "unknown text provider {:?}; expected openai, ollama, huggingface, or stub",
                other
            )))
            .into());
        }
    };
    Ok(drivers)
}

/// The voice cascade for whatever credentials the environment holds.
fn voice_gateway(config: &NinnaConfig) -> VoiceGateway {
    let settings = &config.voice;

    let named: Option<Arc<dyn VoiceDriver>> = match std::env::var("ELEVENLABS_API_KEY") {
        Ok(api_key) => Some(Arc::new(ElevenLabsVoice::new(
            api_key,
            settings.elevenlabs_voice.clone(),
        ))),
        Err(_) => None,
    };

    let free: Option<Arc<dyn VoiceDriver>> = settings
        .use_translate
        .then(|| Arc::new(TranslateVoice::new()) as Arc<dyn VoiceDriver>);

    let mut premium: Vec<Arc<dyn VoiceDriver>> = Vec::new();
    if let Some(voice_id) = &settings.murf_voice_id {
        match std::env::var("MURF_API_KEY") {
            Ok(api_key) => premium.push(Arc::new(MurfVoice::new(api_key, voice_id.clone()))),
            Err(_) => warn!("Murf voice configured but MURF_API_KEY is not set, skipping"),
        }
    }
    if let Some(model) = &settings.huggingface_tts_model {
        match std::env::var("HUGGINGFACE_API_KEY") {
            Ok(api_key) => premium.push(Arc::new(HuggingFaceVoice::new(api_key, model.clone()))),
            Err(_) => {
                warn!("HuggingFace TTS configured but HUGGINGFACE_API_KEY is not set, skipping")
            }
        }
    }

    VoiceGateway::new(
        named,
        free,
        premium,
        settings.language_voice_map(),
        config.provider.timeout(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ninna_engine::ProviderSettings;

    #[test]
    fn stub_config_builds_without_credentials() {
        let config = NinnaConfig::default();
        assert!(build_engine(&config).is_ok());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = NinnaConfig {
            provider: ProviderSettings {
                active: "skynet".into(),
                ..ProviderSettings::default()
            },
            ..NinnaConfig::default()
        };
        assert!(build_engine(&config).is_err());
    }

    #[test]
    fn ollama_needs_no_api_key() {
        let config = NinnaConfig {
            provider: ProviderSettings {
                active: "ollama".into(),
                ..ProviderSettings::default()
            },
            ..NinnaConfig::default()
        };
        assert!(build_engine(&config).is_ok());
    }
}
