//! Structured extraction from free-form model output.
//!
//! Model responses are not guaranteed to contain only JSON: preambles,
//! markdown fences and trailing commentary are common. Everything that
//! needs structured data out of a response goes through [`extract_json`]
//! (or its typed wrapper [`extract_as`]), so the heuristic lives in one
//! place.

mod json;

pub use json::{ExtractionError, extract_as, extract_json};
