//! Application-level configuration.
//!
//! - [`StageModels`] — model and temperature per stage
//! - [`ValidationPolicy`] — what to do when the validation stage itself fails
//! - [`PipelineConfig`] — container handed to the use cases

pub mod stage_models;
pub mod validation_policy;

pub use stage_models::{StageModels, StageSettings};
pub use validation_policy::ValidationPolicy;

/// Everything the stage runner needs besides its ports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub models: StageModels,
    pub validation: ValidationPolicy,
}

impl PipelineConfig {
    pub fn new(models: StageModels, validation: ValidationPolicy) -> Self {
        Self { models, validation }
    }
}
