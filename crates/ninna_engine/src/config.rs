//! Engine configuration.
//!
//! TOML-based configuration with precedence:
//! 1. Bundled defaults (include_str! from ninna.toml)
//! 2. User config in home directory (~/.config/ninna/ninna.toml)
//! 3. User config in current directory (./ninna.toml)

use config::{Config, File, FileFormat};
use ninna_core::Language;
use ninna_error::{ConfigError, NinnaError, NinnaResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Text provider selection and endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Active provider: "openai", "ollama", "huggingface", or "stub".
    #[serde(default = "default_active")]
    pub active: String,
    /// Bound on every provider call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Model for the OpenAI-compatible endpoint.
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Chat completions endpoint URL.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// Local Ollama model.
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    /// Ollama server URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// HuggingFace text generation model.
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,
}

fn default_active() -> String {
    "stub".to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_ollama_model() -> String {
    "mistral".to_string()
}
fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_huggingface_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            active: default_active(),
            timeout_ms: default_timeout_ms(),
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            ollama_model: default_ollama_model(),
            ollama_url: default_ollama_url(),
            huggingface_model: default_huggingface_model(),
        }
    }
}

impl ProviderSettings {
    /// The per-call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Daily quota policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuotaSettings {
    /// Stories per guardian per day.
    #[serde(default = "default_daily_max")]
    pub daily_max: u32,
    /// Premium deployments skip the quota gate entirely.
    #[serde(default)]
    pub premium: bool,
}

fn default_daily_max() -> u32 {
    ninna_quota::DEFAULT_DAILY_MAX
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            daily_max: default_daily_max(),
            premium: false,
        }
    }
}

/// Speech synthesis adapter settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VoiceSettings {
    /// Enable the free keyless adapter.
    #[serde(default = "default_true")]
    pub use_translate: bool,
    /// Default ElevenLabs voice, overriding the language map.
    #[serde(default)]
    pub elevenlabs_voice: Option<String>,
    /// Murf voice identifier; Murf is skipped without one.
    #[serde(default)]
    pub murf_voice_id: Option<String>,
    /// HuggingFace TTS model; skipped without one.
    #[serde(default)]
    pub huggingface_tts_model: Option<String>,
    /// Language code to default named voice.
    #[serde(default)]
    pub voice_map: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            use_translate: default_true(),
            elevenlabs_voice: None,
            murf_voice_id: None,
            huggingface_tts_model: None,
            voice_map: BTreeMap::new(),
        }
    }
}

impl VoiceSettings {
    /// The voice map with parsed language keys; unknown codes are
    /// dropped with a warning.
    pub fn language_voice_map(&self) -> HashMap<Language, String> {
        let mut map = HashMap::new();
        for (code, voice) in &self.voice_map {
            match Language::from_str(code) {
                Ok(language) => {
                    map.insert(language, voice.clone());
                }
                Err(_) => warn!(code, "Ignoring voice map entry for unknown language"),
            }
        }
        map
    }
}

/// Sanitizer replacement table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SafetySettings {
    /// Banned term to safe synonym.
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
}

impl SafetySettings {
    /// The replacement table as ordered pairs, falling back to the
    /// stock table when the configuration carries none.
    pub fn replacement_table(&self) -> Vec<(String, String)> {
        if self.replacements.is_empty() {
            return ninna_safety::default_replacements();
        }
        self.replacements
            .iter()
            .map(|(term, synonym)| (term.clone(), synonym.clone()))
            .collect()
    }
}

/// Top-level Ninna configuration.
///
/// # Example
///
/// ```no_run
/// use ninna_engine::NinnaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NinnaConfig::load()?;
/// println!("Active provider: {}", config.provider.active);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct NinnaConfig {
    /// Text provider settings.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Quota policy.
    #[serde(default)]
    pub quota: QuotaSettings,
    /// Speech synthesis settings.
    #[serde(default)]
    pub voice: VoiceSettings,
    /// Sanitizer settings.
    #[serde(default)]
    pub safety: SafetySettings,
}

impl NinnaConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> NinnaResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                NinnaError::from(ConfigError::new(format!(
                    "failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NinnaError::from(ConfigError::new(format!(
                    "failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    #[instrument]
    pub fn load() -> NinnaResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../ninna.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/ninna/ninna.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("ninna").required(false));

        builder
            .build()
            .map_err(|e| {
                NinnaError::from(ConfigError::new(format!(
                    "failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NinnaError::from(ConfigError::new(format!(
                    "failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let config = NinnaConfig::default();
        assert_eq!(config.provider.active, "stub");
        assert_eq!(config.quota.daily_max, 3);
        assert!(!config.quota.premium);
        assert!(config.voice.use_translate);
        assert!(!config.safety.replacement_table().is_empty());
    }

    #[test]
    fn voice_map_drops_unknown_languages() {
        let mut settings = VoiceSettings::default();
        settings.voice_map.insert("it".into(), "bella".into());
        settings.voice_map.insert("xx".into(), "ghost".into());

        let map = settings.language_voice_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Language::Italian).map(String::as_str), Some("bella"));
    }
}
