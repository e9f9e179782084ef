//! Plan persistence port
//!
//! Stores rendered plans as named documents and manages previously
//! written ones.

use chrono::{DateTime, Local};
use pm_assist_domain::PipelineResult;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the plan store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Only .md files can be deleted: {0}")]
    NotMarkdown(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Simple responses are not saved")]
    SimpleResponse,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A previously written plan document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPlan {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// Storage for plan documents
pub trait PlanRepository: Send + Sync {
    /// Render and write a pipeline result. Refuses simple responses.
    fn save_result(
        &self,
        result: &PipelineResult,
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError>;

    /// Write a guided-session plan verbatim
    fn save_markdown(
        &self,
        markdown: &str,
        timestamp: DateTime<Local>,
        filename: Option<&str>,
    ) -> Result<PathBuf, StoreError>;

    /// All stored plans, newest first
    fn list(&self) -> Result<Vec<StoredPlan>, StoreError>;

    fn read(&self, filename: &str) -> Result<String, StoreError>;

    fn delete(&self, filename: &str) -> Result<(), StoreError>;
}
