//! Content sanitization for generated stories.
//!
//! A fixed replacement table maps frightening vocabulary to gentle
//! synonyms across the supported languages. Matching is word-bounded
//! and case-insensitive; substitution preserves the matched word's
//! initial capitalization and never removes or empties a field.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod sanitizer;

pub use sanitizer::{Sanitizer, default_replacements};
