//! Pipeline behavior from TOML (`[pipeline]`, `[validation]`, `[logging]`)

use pm_assist_application::ValidationPolicy;
use pm_assist_domain::{ConfigIssue, ConfigIssueCode, Depth};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Default depth for `generate` (1 expand, 2 critique, 3 full)
    pub depth: u8,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            depth: Depth::default().as_u8(),
        }
    }
}

impl FilePipelineConfig {
    /// Parse the depth, falling back to full depth when out of range
    pub fn parse_depth(&self) -> (Depth, Vec<ConfigIssue>) {
        match Depth::try_from(self.depth) {
            Ok(depth) => (depth, Vec::new()),
            Err(_) => (
                Depth::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: "pipeline.depth".to_string(),
                        value: self.depth.to_string(),
                    },
                    format!(
                        "pipeline.depth: {} is not 1, 2 or 3, using {}",
                        self.depth,
                        Depth::default()
                    ),
                )],
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    /// Treat validation failures as "valid" instead of aborting
    pub fail_open: bool,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        Self { fail_open: true }
    }
}

impl FileValidationConfig {
    pub fn to_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            fail_open: self.fail_open,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every stage call
    pub conversation_log: Option<PathBuf>,
}
