//! Speech synthesis adapters.
//!
//! Each adapter wraps one TTS provider API behind
//! [`ninna_interface::VoiceDriver`]. Adapters never decide cascade
//! order; the voice gateway does.

mod elevenlabs;
mod hf_tts;
mod murf;
mod translate;

pub use elevenlabs::ElevenLabsVoice;
pub use hf_tts::HuggingFaceVoice;
pub use murf::MurfVoice;
pub use translate::TranslateVoice;
