//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod guided_session;
pub mod run_pipeline;
pub mod stages;

#[cfg(test)]
pub(crate) mod testing;
