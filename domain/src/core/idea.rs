//! Idea value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A product idea submitted by the user (Value Object)
///
/// The raw text is kept verbatim; it is only rejected when blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Idea {
    content: String,
}

impl Idea {
    /// Create a new idea, rejecting blank text
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyIdea)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the idea text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl TryFrom<String> for Idea {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Idea> for String {
    fn from(idea: Idea) -> Self {
        idea.content
    }
}

impl std::fmt::Display for Idea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_idea_rejected() {
        assert_eq!(Idea::new("   \n\t"), Err(DomainError::EmptyIdea));
        assert_eq!(Idea::new(""), Err(DomainError::EmptyIdea));
    }

    #[test]
    fn test_content_kept_verbatim() {
        let idea = Idea::new("  a fitness app  ").unwrap();
        assert_eq!(idea.content(), "  a fitness app  ");
        assert_eq!(idea.word_count(), 3);
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let result: Result<Idea, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
        let idea: Idea = serde_json::from_str("\"recipe sharing\"").unwrap();
        assert_eq!(idea.content(), "recipe sharing");
    }
}
