//! Product plan entity produced by the refinement stage

use serde::{Deserialize, Serialize};

/// Structured product plan (Entity)
///
/// Field names follow the camelCase JSON shape the refinement prompt asks
/// the model for. Every field is required when deserializing model output:
/// a response missing a section is a format error, not a partial plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPlan {
    pub problem_and_solution: String,
    pub target_user: String,
    pub core_features: Vec<String>,
    pub technical_considerations: String,
    pub risks_and_edge_cases: Vec<String>,
    pub open_questions: Vec<String>,
    pub suggested_next_steps: Vec<String>,
}

impl ProductPlan {
    /// Plan carrying only the expansion narrative (depth 1)
    pub fn from_expansion(expanded_idea: impl Into<String>) -> Self {
        Self {
            problem_and_solution: expanded_idea.into(),
            ..Default::default()
        }
    }

    /// Plan carrying the expansion and the critique (depth 2)
    pub fn from_expansion_and_critique(
        expanded_idea: impl Into<String>,
        critique: impl Into<String>,
    ) -> Self {
        Self {
            problem_and_solution: expanded_idea.into(),
            technical_considerations: critique.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if every field is empty (simple-response placeholder)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The seven plan sections as markdown, in fixed order
    pub fn sections_markdown(&self) -> String {
        let sections = [
            ("Problem & Solution", self.problem_and_solution.clone()),
            ("Target User", self.target_user.clone()),
            ("Core Features (MVP)", bullets(&self.core_features)),
            ("Technical Considerations", self.technical_considerations.clone()),
            ("Risks & Edge Cases", bullets(&self.risks_and_edge_cases)),
            ("Open Questions", bullets(&self.open_questions)),
            ("Suggested Next Steps", numbered(&self.suggested_next_steps)),
        ];

        sections
            .iter()
            .map(|(title, body)| format!("## {}\n\n{}\n", title, or_none(body)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_none(body: &str) -> &str {
    if body.trim().is_empty() { "_None_" } else { body }
}
