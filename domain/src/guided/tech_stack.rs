//! Guided-session value objects

use serde::{Deserialize, Serialize};

/// One technology stack proposed by the tech-stack generator (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStackOption {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

impl TechStackOption {
    /// Comma-separated technology list, as used in prompts
    pub fn technologies_list(&self) -> String {
        self.technologies.join(", ")
    }
}

/// A question from the open-question generator and the user's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
