//! ninna: quota-gated bedtime story generation for children.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Design Philosophy
//!
//! The pipeline is built from small crates wired together through
//! traits, so every seam can be swapped or faked:
//!
//! - [`StoryDriver`] - text generation backends (OpenAI-compatible,
//!   Ollama, HuggingFace)
//! - [`VoiceDriver`] - speech synthesis backends (ElevenLabs, Murf,
//!   HuggingFace TTS, and a free keyless adapter)
//! - [`StoryRepository`] - persistence for identities, children,
//!   stories, and continuity state
//! - [`AuditSink`] - the append-only trail of generation outcomes
//!
//! Every provider is optional. A deployment with no API keys at all
//! still tells a complete story: the text gateway falls back to a
//! bundled payload and the voice gateway degrades to silent output.
//!
//! # Example
//!
//! ```rust,no_run
//! use ninna::{GenerationOutcome, NinnaConfig, StoryRequest, build_engine};
//!
//! # async fn run(request: StoryRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let config = NinnaConfig::load()?;
//! let engine = build_engine(&config)?;
//! match engine.generate(request).await? {
//!     GenerationOutcome::Story(response) => println!("{}", response.story.intro),
//!     GenerationOutcome::Denied => println!("quota exhausted"),
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod cli;

pub use builder::build_engine;
pub use cli::{Cli, Commands};

// Re-export core types
pub use ninna_core::{
    AudioClip, ChildAttributes, ContinuityState, ControlSettings, GenerateRequest,
    GenerateResponse, Language, Message, Role, StoryPayload, StoryRequest, StoryResponse,
    hash_alias, hash_email, init_telemetry, normalize_interests,
};

// Re-export error types
pub use ninna_error::{NinnaError, NinnaErrorKind, NinnaResult};

// Re-export driver traits
pub use ninna_interface::{StoryDriver, VoiceDriver};

// Re-export provider adapters
pub use ninna_models::{
    ElevenLabsVoice, HuggingFaceClient, HuggingFaceVoice, MurfVoice, OllamaClient, OpenAiClient,
    TranslateVoice,
};

// Re-export the pipeline and its configuration
pub use ninna_engine::{
    GenerationOutcome, NinnaConfig, ProviderSettings, QuotaSettings, SafetySettings, StoryEngine,
    SummaryExtractor, TextGateway, VoiceGateway, VoiceSettings,
};

// Re-export quota, storage, and safety building blocks
pub use ninna_quota::{DEFAULT_DAILY_MAX, MemoryQuotaStore, QuotaLedger, QuotaOutcome, QuotaStore};
pub use ninna_safety::Sanitizer;
pub use ninna_storage::{
    AuditEvent, AuditSink, MemoryAuditSink, MemoryRepository, StoryRepository,
};
