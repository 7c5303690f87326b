//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question asked by a patient (Value Object)
///
/// Holds the trimmed text. Construction fails for empty or
/// whitespace-only input, so a `Question` is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Create a new question, reporting blank input as a domain error
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::try_new(content)
            .ok_or_else(|| DomainError::InvalidQuestion("message required".to_string()))
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lowercased form used for keyword matching
    pub fn normalized(&self) -> String {
        self.content.to_lowercase()
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
