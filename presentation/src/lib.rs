//! Presentation layer for pm-assist
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive guided-session REPL.

pub mod cli;
pub mod guided;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, FilesCommand, FormatArg};
pub use guided::GuidedRepl;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
