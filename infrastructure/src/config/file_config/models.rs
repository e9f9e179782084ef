//! Per-stage model configuration from TOML (`[models]` section)

use pm_assist_application::StageModels;
use pm_assist_domain::{ConfigIssue, ConfigIssueCode, Model, Stage};
use serde::{Deserialize, Serialize};

/// Per-stage model overrides
///
/// Unset stages keep their built-in model.
///
/// # Example
///
/// ```toml
/// [models]
/// validation = "deepseek/deepseek-chat"
/// critique = "meta-llama/llama-3.3-70b-instruct"
/// guided_plan = "openai/gpt-4o-mini"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub validation: Option<String>,
    pub expansion: Option<String>,
    pub critique: Option<String>,
    pub refinement: Option<String>,
    pub tech_stack: Option<String>,
    pub questions: Option<String>,
    pub guided_plan: Option<String>,
}

impl FileModelsConfig {
    fn field(&self, stage: Stage) -> Option<&String> {
        match stage {
            Stage::Validation => self.validation.as_ref(),
            Stage::Expansion => self.expansion.as_ref(),
            Stage::Critique => self.critique.as_ref(),
            Stage::Refinement => self.refinement.as_ref(),
            Stage::TechStack => self.tech_stack.as_ref(),
            Stage::OpenQuestions => self.questions.as_ref(),
            Stage::GuidedPlan => self.guided_plan.as_ref(),
        }
    }

    /// Build the stage table, collecting issues for empty names.
    ///
    /// An empty name falls back to the stage's built-in model.
    pub fn to_stage_models(&self) -> (StageModels, Vec<ConfigIssue>) {
        let mut models = StageModels::default();
        let mut issues = Vec::new();

        for stage in Stage::ALL {
            match self.field(stage) {
                None => {}
                Some(name) if name.trim().is_empty() => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::EmptyModelName {
                            field: stage.as_str().to_string(),
                        },
                        format!(
                            "models.{}: model name cannot be empty, using {}",
                            stage.as_str(),
                            stage.default_model()
                        ),
                    ));
                }
                Some(name) => {
                    let Ok(model) = name.parse::<Model>();
                    models = models.with_model(stage, model);
                }
            }
        }

        (models, issues)
    }
}
