//! Top-level error wrapper types.

use crate::{ConfigError, EngineError, JsonError, ProviderError, SafetyError, StorageError};

/// The foundation error enum uniting the per-concern error types.
///
/// # Examples
///
/// ```
/// use ninna_error::{NinnaError, ConfigError};
///
/// let cfg_err = ConfigError::new("bad endpoint");
/// let err: NinnaError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NinnaErrorKind {
    /// Text or voice provider error.
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Configuration error.
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error.
    #[from(JsonError)]
    Json(JsonError),
    /// Repository error.
    #[from(StorageError)]
    Storage(StorageError),
    /// Sanitizer construction error.
    #[from(SafetyError)]
    Safety(SafetyError),
    /// Orchestration error.
    #[from(EngineError)]
    Engine(EngineError),
}

/// Ninna error with kind discrimination.
///
/// # Examples
///
/// ```
/// use ninna_error::{NinnaResult, SafetyError};
///
/// fn might_fail() -> NinnaResult<()> {
///     Err(SafetyError::new("replacement is itself banned"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Ninna Error: {}", _0)]
pub struct NinnaError(Box<NinnaErrorKind>);

impl NinnaError {
    /// Create a new error from a kind.
    pub fn new(kind: NinnaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NinnaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NinnaErrorKind
impl<T> From<T> for NinnaError
where
    T: Into<NinnaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Ninna operations.
pub type NinnaResult<T> = std::result::Result<T, NinnaError>;
