//! Error types for the Ninna story generation library.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use ninna_error::{NinnaResult, ConfigError};
//!
//! fn load_settings() -> NinnaResult<String> {
//!     Err(ConfigError::new("missing provider endpoint"))?
//! }
//!
//! match load_settings() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod json;
mod provider;
mod safety;
mod storage;

pub use config::ConfigError;
pub use engine::{EngineError, EngineErrorKind};
pub use error::{NinnaError, NinnaErrorKind, NinnaResult};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind};
pub use safety::SafetyError;
pub use storage::{StorageError, StorageErrorKind};
