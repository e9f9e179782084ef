//! Stage value object

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// A discrete model-invoking unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Classify the idea as a product concept or chit-chat
    Validation,
    /// Flesh the idea out into a problem/solution narrative
    Expansion,
    /// Criticise the expansion
    Critique,
    /// Synthesize expansion and critique into a [`ProductPlan`](crate::ProductPlan)
    Refinement,
    /// Propose technology stacks (guided session)
    TechStack,
    /// Ask open questions about the chosen stack (guided session)
    OpenQuestions,
    /// Write the final guided plan
    GuidedPlan,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Validation,
        Stage::Expansion,
        Stage::Critique,
        Stage::Refinement,
        Stage::TechStack,
        Stage::OpenQuestions,
        Stage::GuidedPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Expansion => "expansion",
            Stage::Critique => "critique",
            Stage::Refinement => "refinement",
            Stage::TechStack => "tech_stack",
            Stage::OpenQuestions => "questions",
            Stage::GuidedPlan => "guided_plan",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Validation => "Validating input",
            Stage::Expansion => "Expanding idea",
            Stage::Critique => "Critiquing",
            Stage::Refinement => "Refining into structured plan",
            Stage::TechStack => "Generating tech stack options",
            Stage::OpenQuestions => "Generating open questions",
            Stage::GuidedPlan => "Generating final plan",
        }
    }

    /// Sampling temperature used when no override is configured.
    ///
    /// Expansion runs hot for breadth; validation and refinement run cool
    /// for consistent structured output.
    pub fn default_temperature(&self) -> f32 {
        match self {
            Stage::Validation => 0.1,
            Stage::Expansion => 0.8,
            Stage::Refinement => 0.5,
            Stage::Critique | Stage::TechStack | Stage::OpenQuestions | Stage::GuidedPlan => 0.7,
        }
    }

    /// Model used when no override is configured
    pub fn default_model(&self) -> Model {
        match self {
            Stage::Validation | Stage::Expansion | Stage::TechStack => Model::DeepSeekChat,
            Stage::Critique | Stage::Refinement | Stage::OpenQuestions | Stage::GuidedPlan => {
                Model::Llama33_70bInstruct
            }
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperatures() {
        assert!(Stage::Expansion.default_temperature() > Stage::Refinement.default_temperature());
        assert!(Stage::Validation.default_temperature() < 0.2);
    }

    #[test]
    fn test_identifiers_unique() {
        let mut names: Vec<_> = Stage::ALL.iter().map(|s| s.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Stage::ALL.len());
    }
}
