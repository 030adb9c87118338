//! Provider error types.
//!
//! These errors never cross a gateway boundary: the text and voice gateways
//! recover from every variant by falling through to the next adapter.

/// Specific error conditions for text and voice provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The provider endpoint could not be reached.
    #[display("Provider '{}' unavailable: {}", provider, message)]
    Unavailable {
        /// Provider name.
        provider: String,
        /// Underlying transport message.
        message: String,
    },
    /// The provider answered with a non-success status.
    #[display("Provider '{}' returned status {}: {}", provider, status, message)]
    Api {
        /// Provider name.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },
    /// The provider response did not match the expected structure.
    #[display("Provider '{}' returned malformed output: {}", provider, message)]
    Malformed {
        /// Provider name.
        provider: String,
        /// What failed to parse.
        message: String,
    },
    /// The call exceeded its bounded timeout.
    #[display("Provider '{}' timed out after {}ms", provider, elapsed_ms)]
    Timeout {
        /// Provider name.
        provider: String,
        /// Configured timeout in milliseconds.
        elapsed_ms: u64,
    },
    /// The provider produced an empty payload.
    #[display("Provider '{}' returned an empty payload", _0)]
    Empty(String),
    /// The adapter is missing required configuration (key, voice, model).
    #[display("Provider misconfigured: {}", _0)]
    Misconfigured(String),
}

/// Error type for provider operations.
///
/// # Examples
///
/// ```
/// use ninna_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Empty("ollama".into()));
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The specific error condition.
    pub kind: ProviderErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an unreachable-endpoint error.
    #[track_caller]
    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable {
            provider: provider.into(),
            message: message.into(),
        })
    }

    /// Shorthand for a malformed-output error.
    #[track_caller]
    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Malformed {
            provider: provider.into(),
            message: message.into(),
        })
    }
}
