//! Generation pipeline orchestration.
//!
//! The engine turns a validated [`ninna_core::StoryRequest`] into a
//! complete [`ninna_core::StoryResponse`]: quota gate, continuity
//! lookup, text generation with stub fallback, sanitization, audio
//! synthesis, summary extraction, and persistence.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extraction;
mod orchestrator;
mod prompt;
mod stub;
mod summary;
mod text_gateway;
mod voice_gateway;

pub use config::{
    NinnaConfig, ProviderSettings, QuotaSettings, SafetySettings, VoiceSettings,
};
pub use extraction::{extract_json, parse_json};
pub use orchestrator::{GenerationOutcome, StoryEngine};
pub use prompt::{build_story_prompt, build_story_request, build_summary_request};
pub use stub::{STUB_PROVIDER, stub_story};
pub use summary::SummaryExtractor;
pub use text_gateway::{StoryOutcome, TextGateway};
pub use voice_gateway::{AudioOutcome, VoiceGateway};
