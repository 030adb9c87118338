//! Storage error types.

/// Specific error conditions for repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// A record was requested that does not exist.
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// A write failed and the record cannot be considered persisted.
    #[display("Write failed: {}", _0)]
    WriteFailed(String),
    /// The backing store is unreachable or corrupted.
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
    /// A record failed to serialize for storage.
    #[display("Serialization failed: {}", _0)]
    Serialization(String),
}

/// Error type for repository operations.
///
/// A `WriteFailed` on the story record is fatal for the request; continuity
/// writes are best-effort and callers downgrade this error to a warning.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The specific error condition.
    pub kind: StorageErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
