//! Trait definitions for the Ninna story generation library.
//!
//! This crate provides the driver traits every provider adapter
//! implements: text generation backends and speech synthesis backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{StoryDriver, VoiceDriver};
