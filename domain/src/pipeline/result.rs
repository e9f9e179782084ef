//! Pipeline result envelope

use crate::core::idea::Idea;
use crate::pipeline::depth::Depth;
use crate::plan::ProductPlan;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The single envelope returned by the linear pipeline
///
/// A simple response (`is_simple_response == true`) carries the canned reply
/// and empty placeholders everywhere else; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub original_idea: String,
    pub expanded_idea: String,
    pub critique: String,
    pub plan: ProductPlan,
    pub timestamp: DateTime<Local>,
    pub is_simple_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_response: Option<String>,
    /// Depth the run was requested with (absent for simple responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<Depth>,
}

impl PipelineResult {
    /// Short-circuit result for input that is not a product idea
    pub fn simple(idea: &Idea, reply: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            original_idea: idea.content().to_string(),
            expanded_idea: String::new(),
            critique: String::new(),
            plan: ProductPlan::default(),
            timestamp,
            is_simple_response: true,
            simple_response: Some(reply.into()),
            depth: None,
        }
    }

    /// Result of a pipeline that ran to its requested depth
    pub fn completed(
        idea: &Idea,
        depth: Depth,
        expanded_idea: impl Into<String>,
        critique: impl Into<String>,
        plan: ProductPlan,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            original_idea: idea.content().to_string(),
            expanded_idea: expanded_idea.into(),
            critique: critique.into(),
            plan,
            timestamp,
            is_simple_response: false,
            simple_response: None,
            depth: Some(depth),
        }
    }

    /// Whether this result should be written out as a plan document
    pub fn is_persistable(&self) -> bool {
        !self.is_simple_response
    }

    /// Full plan document: header, plan sections, then an appendix with the
    /// original idea and every stage output verbatim.
    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "# Product Plan\n\n> Generated on {}\n\n{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.plan.sections_markdown()
        );

        md.push_str("\n---\n\n## Appendix: Pipeline Outputs\n\n");
        md.push_str(&format!("### Original Idea\n{}\n\n", self.original_idea));
        md.push_str(&format!("### Expanded Idea\n{}\n", self.expanded_idea));
        if !self.critique.is_empty() {
            md.push_str(&format!("\n### Critique\n{}\n", self.critique));
        }
        md
    }
}
