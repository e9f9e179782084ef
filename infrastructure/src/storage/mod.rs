//! Plan document storage.
//!
//! Provides [`MarkdownPlanStore`], a directory of markdown files that
//! implements the [`PlanRepository`](pm_assist_application::PlanRepository) port.

mod markdown_store;

pub use markdown_store::MarkdownPlanStore;
