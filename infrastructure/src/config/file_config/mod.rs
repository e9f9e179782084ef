//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod models;
mod output;
mod pipeline;
mod provider;

pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use pipeline::{FileLoggingConfig, FilePipelineConfig, FileValidationConfig};
pub use provider::FileProviderConfig;

use pm_assist_application::PipelineConfig;
use pm_assist_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Inference endpoint and credentials
    pub provider: FileProviderConfig,
    /// Per-stage model selection
    pub models: FileModelsConfig,
    /// Pipeline defaults
    pub pipeline: FilePipelineConfig,
    /// Validation failure policy
    pub validation: FileValidationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.to_stage_models().1);
        issues.extend(self.pipeline.parse_depth().1);
        issues
    }

    /// Application config for the stage runner
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.models.to_stage_models().0, self.validation.to_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_assist_domain::{Depth, Model, Stage};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
api_key_env = "MY_KEY"
timeout_secs = 30

[models]
critique = "openai/gpt-4o"

[pipeline]
depth = 1

[validation]
fail_open = false

[output]
dir = "plans"
color = false

[logging]
conversation_log = "transcript.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.api_key_env, "MY_KEY");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.provider.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.pipeline.parse_depth().0, Depth::Expand);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("transcript.jsonl"))
        );

        let pipeline = config.pipeline_config();
        assert!(!pipeline.validation.fail_open);
        assert_eq!(
            pipeline.models.get(Stage::Critique).model,
            Model::Custom("openai/gpt-4o".to_string())
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[models]
refinement = "deepseek/deepseek-chat"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.models.get(Stage::Refinement).model, Model::DeepSeekChat);
        // Defaults should apply
        assert!(config.output.color);
        assert!(config.validation.fail_open);
        assert_eq!(config.pipeline.depth, 3);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_each_issue() {
        let toml_str = r#"
[models]
expansion = ""

[pipeline]
depth = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate().len(), 2);
    }
}
