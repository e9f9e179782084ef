//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Idea cannot be empty")]
    EmptyIdea,

    #[error("Invalid depth: {0} (expected 1, 2 or 3)")]
    InvalidDepth(String),

    #[error("Invalid selection '{input}': enter a number between 1 and {max}, or 'auto'")]
    InvalidSelection { input: String, max: usize },

    #[error("No open questions to ask")]
    NoQuestions,

    #[error("Invalid interview state: {0}")]
    InvalidInterview(String),
}

impl DomainError {
    /// Check if this error should re-prompt the user rather than abort
    pub fn is_reprompt(&self) -> bool {
        matches!(self, DomainError::InvalidSelection { .. })
    }
}
