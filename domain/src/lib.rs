//! Domain layer for pm-assist
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Linear pipeline
//!
//! An [`Idea`] flows through up to four [`Stage`]s (validation, expansion,
//! critique, refinement). The requested [`Depth`] decides where the pipeline
//! stops, and every run is packaged into a [`PipelineResult`].
//!
//! ## Guided session
//!
//! [`GuidedSession`] is a tagged union over the steps of the interactive
//! flow. Each variant carries only the data valid in that step, so a session
//! can never be asked for its questions before a stack has been chosen.
//!
//! ## Structured extraction
//!
//! Model output is free text. [`extract_json`] locates the JSON payload
//! inside it; every structured stage goes through that single function.

pub mod config;
pub mod core;
pub mod extraction;
pub mod guided;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, idea::Idea, model::Model};
pub use extraction::{ExtractionError, extract_as, extract_json};
pub use guided::{
    selection::StackSelection,
    session::{CompletedSession, GuidedSession, GuidedStep, Interview, StackChoices},
    tech_stack::{QuestionAnswer, TechStackOption},
};
pub use pipeline::{depth::Depth, result::PipelineResult, stage::Stage};
pub use plan::ProductPlan;
pub use prompt::PromptTemplate;
pub use validation::{ValidationVerdict, filler::canned_reply_for};
