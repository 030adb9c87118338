//! Sanitizer error types.

/// Sanitizer construction error with source location.
///
/// Raised only while building a sanitizer from configuration (invalid
/// pattern, or a replacement that is itself a banned term, which would
/// break idempotency). Applying a built sanitizer never fails.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Safety Error: {} at line {} in {}", message, line, file)]
pub struct SafetyError {
    /// The underlying error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// File where the error occurred.
    pub file: &'static str,
}

impl SafetyError {
    /// Create a new SafetyError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
