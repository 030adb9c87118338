//! Message types for generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message in a generation conversation.
///
/// Ninna's providers are text-in, text-out: prompts carry no media, so
/// message content is a plain string rather than a multimodal list.
///
/// # Examples
///
/// ```
/// use ninna_core::{Message, Role};
///
/// let message = Message::new(Role::User, "Tell me a story");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
