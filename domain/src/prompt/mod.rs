//! Prompt domain
//!
//! Templates for the prompt sent at each pipeline and guided-session stage.

mod template;

pub use template::PromptTemplate;
