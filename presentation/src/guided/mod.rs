//! Interactive guided-session module
//!
//! Provides a readline-based REPL that walks an idea through stack
//! selection and open questions to a final plan.

mod repl;

pub use repl::GuidedRepl;
