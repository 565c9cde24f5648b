//! Modal prompts.
//!
//! Prompts collect one string from the user (a link URL, an image
//! caption). While one is open, pointer events must not end the active
//! edit session. Cancellation is a sentinel outcome, never an error.

/// How a prompt was closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
}

/// An open modal prompt
#[derive(Debug, Clone)]
pub struct ModalPrompt {
    /// Localized message shown to the user
    pub message: String,

    /// Current input value
    pub value: String,
}

impl ModalPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            value: String::new(),
        }
    }
}
