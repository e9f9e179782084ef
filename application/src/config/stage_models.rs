//! Per-stage model selection.

use pm_assist_domain::{Model, Stage};

/// Model and sampling temperature for one stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub model: Model,
    pub temperature: f32,
}

impl StageSettings {
    pub fn new(model: Model, temperature: f32) -> Self {
        Self { model, temperature }
    }

    /// Built-in settings for `stage`
    pub fn default_for(stage: Stage) -> Self {
        Self::new(stage.default_model(), stage.default_temperature())
    }
}

/// Stage → settings table
///
/// Temperatures are fixed per stage; only the model is configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct StageModels {
    validation: StageSettings,
    expansion: StageSettings,
    critique: StageSettings,
    refinement: StageSettings,
    tech_stack: StageSettings,
    open_questions: StageSettings,
    guided_plan: StageSettings,
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            validation: StageSettings::default_for(Stage::Validation),
            expansion: StageSettings::default_for(Stage::Expansion),
            critique: StageSettings::default_for(Stage::Critique),
            refinement: StageSettings::default_for(Stage::Refinement),
            tech_stack: StageSettings::default_for(Stage::TechStack),
            open_questions: StageSettings::default_for(Stage::OpenQuestions),
            guided_plan: StageSettings::default_for(Stage::GuidedPlan),
        }
    }
}

impl StageModels {
    pub fn get(&self, stage: Stage) -> &StageSettings {
        match stage {
            Stage::Validation => &self.validation,
            Stage::Expansion => &self.expansion,
            Stage::Critique => &self.critique,
            Stage::Refinement => &self.refinement,
            Stage::TechStack => &self.tech_stack,
            Stage::OpenQuestions => &self.open_questions,
            Stage::GuidedPlan => &self.guided_plan,
        }
    }

    fn get_mut(&mut self, stage: Stage) -> &mut StageSettings {
        match stage {
            Stage::Validation => &mut self.validation,
            Stage::Expansion => &mut self.expansion,
            Stage::Critique => &mut self.critique,
            Stage::Refinement => &mut self.refinement,
            Stage::TechStack => &mut self.tech_stack,
            Stage::OpenQuestions => &mut self.open_questions,
            Stage::GuidedPlan => &mut self.guided_plan,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, stage: Stage, model: Model) -> Self {
        self.get_mut(stage).model = model;
        self
    }

    /// Use `model` for every stage
    pub fn with_all(mut self, model: Model) -> Self {
        for stage in Stage::ALL {
            self.get_mut(stage).model = model.clone();
        }
        self
    }
}
