//! Orchestration engine error types.

/// Specific error conditions for the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EngineErrorKind {
    /// The request referenced a language outside the allow-list.
    #[display("Unsupported language: {}", _0)]
    UnsupportedLanguage(String),
    /// A request field failed defensive normalization.
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
    /// The engine was constructed without a required collaborator.
    #[display("Engine misconfigured: {}", _0)]
    Misconfigured(String),
}

/// Error type for orchestration operations.
///
/// Quota denial is not an error: it is surfaced as a distinct
/// outcome variant by the engine.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Engine Error: {} at line {} in {}", kind, line, file)]
pub struct EngineError {
    /// The specific error condition.
    pub kind: EngineErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Create a new EngineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EngineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
