//! Linear pipeline concepts
//!
//! - [`stage::Stage`] — one model-invoking unit of work
//! - [`depth::Depth`] — how far the linear pipeline runs
//! - [`result::PipelineResult`] — the envelope every run returns

pub mod depth;
pub mod result;
pub mod stage;
