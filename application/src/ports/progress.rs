//! Progress notification port
//!
//! Defines the interface for reporting progress while pipeline stages run.

use pm_assist_domain::Stage;

/// Callback for progress updates during a pipeline run or guided turn
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts. `position` is 1-based within `total`;
    /// validation runs ahead of the count and reports position 0.
    fn on_stage_start(&self, stage: Stage, position: usize, total: usize);

    /// Called when a stage finishes
    fn on_stage_complete(&self, stage: Stage, success: bool);

    /// Called when validation short-circuits the run
    fn on_short_circuit(&self, _reply: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _position: usize, _total: usize) {}
    fn on_stage_complete(&self, _stage: Stage, _success: bool) {}
}
