//! Request and response types for text generation.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// Generic text generation request.
///
/// # Examples
///
/// ```
/// use ninna_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest {
///     messages: vec![Message::new(Role::User, "Hello!")],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: None,
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Build a system + user request, the shape every Ninna prompt uses.
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message::new(Role::System, system),
                Message::new(Role::User, user),
            ],
            ..Self::default()
        }
    }

    /// Concatenate all message content into a single prompt string.
    ///
    /// Used by adapters whose APIs accept one flat prompt (Ollama,
    /// HuggingFace text-generation) rather than a message list.
    pub fn flat_prompt(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The unified generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
}

impl GenerateResponse {
    /// Wrap generated text in a response.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
