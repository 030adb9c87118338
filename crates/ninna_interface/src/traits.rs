//! Driver traits for text and speech backends.

use async_trait::async_trait;
use ninna_core::{AudioClip, GenerateRequest, GenerateResponse, Language};
use ninna_error::NinnaResult;

/// Core trait that all text generation backends implement.
///
/// The gateway walks an ordered list of these, so every failure mode
/// must surface as an `Err` rather than a panic; the next driver in
/// line is the recovery path.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> NinnaResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "ollama", "huggingface").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini", "mistral").
    fn model_name(&self) -> &str;
}

/// Trait for speech synthesis backends.
///
/// Implementations turn narration text into an encoded audio clip. The
/// voice gateway cascades through these, so like [`StoryDriver`] every
/// failure must come back as an `Err`.
#[async_trait]
pub trait VoiceDriver: Send + Sync {
    /// Synthesize narration audio for the given text.
    ///
    /// `voice` is a provider-specific voice identifier; drivers that
    /// only offer a fixed voice ignore it.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: Option<&str>,
    ) -> NinnaResult<AudioClip>;

    /// Provider name (e.g., "elevenlabs", "translate", "murf").
    fn provider_name(&self) -> &'static str;

    /// Whether this driver honors a caller-requested voice identifier.
    fn supports_named_voices(&self) -> bool {
        false
    }
}
