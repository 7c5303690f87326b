//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown safety setting: {0}")]
    UnknownSafetySetting(String),

    #[error("Unknown list style: {0}")]
    UnknownListStyle(String),
}

impl DomainError {
    /// Check if this error was caused by user input rather than configuration
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::InvalidQuestion(_))
    }
}
