//! Progress reporting for pipeline stages

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use pm_assist_application::ProgressNotifier;
use pm_assist_domain::Stage;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per running stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// `Stage 2/3` label; validation runs ahead of the count
fn stage_label(position: usize, total: usize) -> String {
    if position == 0 {
        "Stage 0".to_string()
    } else {
        format!("Stage {}/{}", position, total)
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, position: usize, total: usize) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage_label(position, total));
        pb.set_message(format!("{}...", stage.display_name()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            if success {
                pb.finish_with_message(format!("{} {}", "v".green(), stage.display_name()));
            } else {
                pb.abandon_with_message(format!("{} {}", "x".red(), stage.display_name()));
            }
        }
    }

    fn on_short_circuit(&self, _reply: &str) {
        if let Ok(mut slot) = self.stage_bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, position: usize, total: usize) {
        eprintln!(
            "{} {}: {}...",
            "->".cyan(),
            stage_label(position, total).bold(),
            stage.display_name()
        );
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if !success {
            eprintln!("  {} {} (failed)", "x".red(), stage.display_name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_label() {
        assert_eq!(stage_label(0, 3), "Stage 0");
        assert_eq!(stage_label(1, 3), "Stage 1/3");
        assert_eq!(stage_label(2, 2), "Stage 2/2");
    }

    #[test]
    fn test_reporter_tolerates_unmatched_complete() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_complete(Stage::Expansion, true);
        reporter.on_stage_start(Stage::Expansion, 1, 1);
        reporter.on_stage_complete(Stage::Expansion, false);
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }
}
