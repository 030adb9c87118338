//! Provider adapters for the Ninna story generation library.
//!
//! Text drivers implement [`ninna_interface::StoryDriver`]; speech
//! drivers implement [`ninna_interface::VoiceDriver`]. Each adapter is
//! a thin client over one provider API, constructed once at startup and
//! shared behind an `Arc` by the gateways.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod huggingface;
mod ollama;
mod openai;
pub mod voice;

pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use voice::{ElevenLabsVoice, HuggingFaceVoice, MurfVoice, TranslateVoice};
