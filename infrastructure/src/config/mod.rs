//! Configuration file loading for pm-assist
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PM_ASSIST_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pm-assist.toml` or `./.pm-assist.toml`
//! 4. Global: `~/.config/pm-assist/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileModelsConfig, FileOutputConfig, FilePipelineConfig,
    FileProviderConfig, FileValidationConfig,
};
pub use loader::ConfigLoader;
