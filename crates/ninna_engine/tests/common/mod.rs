//! Fake drivers shared by the engine integration tests.

use async_trait::async_trait;
use ninna_core::{AudioClip, GenerateRequest, GenerateResponse, Language};
use ninna_error::{NinnaResult, ProviderError, ProviderErrorKind};
use ninna_interface::{StoryDriver, VoiceDriver};
use std::sync::Mutex;

/// Canned behavior for a fake text driver.
pub enum TextBehavior {
    /// Answer with this text.
    Respond(String),
    /// Fail with an unavailable error.
    Fail,
}

/// Records prompts and replays a canned response.
pub struct FakeDriver {
    pub name: &'static str,
    pub behavior: TextBehavior,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeDriver {
    pub fn respond(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            behavior: TextBehavior::Respond(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            behavior: TextBehavior::Fail,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryDriver for FakeDriver {
    async fn generate(&self, req: &GenerateRequest) -> NinnaResult<GenerateResponse> {
        self.prompts.lock().unwrap().push(req.flat_prompt());
        match &self.behavior {
            TextBehavior::Respond(text) => Ok(GenerateResponse::new(text.clone())),
            TextBehavior::Fail => Err(ProviderError::unavailable(self.name, "fake outage").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

/// Canned behavior for a fake voice driver.
pub enum VoiceBehavior {
    /// Produce a clip with these bytes.
    Respond(Vec<u8>),
    /// Fail with an unavailable error.
    Fail,
}

pub struct FakeVoice {
    pub name: &'static str,
    pub behavior: VoiceBehavior,
    pub calls: Mutex<Vec<Option<String>>>,
}

impl FakeVoice {
    pub fn respond(name: &'static str, data: Vec<u8>) -> Self {
        Self {
            name,
            behavior: VoiceBehavior::Respond(data),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            behavior: VoiceBehavior::Fail,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceDriver for FakeVoice {
    async fn synthesize(
        &self,
        _text: &str,
        _language: Language,
        voice: Option<&str>,
    ) -> NinnaResult<AudioClip> {
        self.calls.lock().unwrap().push(voice.map(str::to_string));
        match &self.behavior {
            VoiceBehavior::Respond(data) => Ok(AudioClip::new("audio/mpeg", data.clone())),
            VoiceBehavior::Fail => {
                Err(ProviderError::new(ProviderErrorKind::Empty(self.name.into())).into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn supports_named_voices(&self) -> bool {
        true
    }
}

/// A valid story payload as a model would return it, with a sequel hook
/// and a frightening word for the sanitizer tests.
pub fn story_json() -> String {
    serde_json::json!({
        "intro": "Sofia guardava le stelle dalla finestra.",
        "choice_1_prompt": "Seguire la volpe o il gufo?",
        "choice_1_options": ["Volpe", "Gufo"],
        "branch_1": "La volpe la guidò senza paura nel bosco.",
        "choice_2_prompt": "Canzone o sogno?",
        "choice_2_options": ["Canzone", "Sogno"],
        "branch_2": "Il gufo d'argento le insegnò la gentilezza.",
        "resolution": "Sofia si addormentò serena.",
        "moral_summary": "La gentilezza illumina il buio.",
        "suggested_sequel_hook": "Il gufo promette di tornare domani."
    })
    .to_string()
}
