//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use pm_assist_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for `generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plan sections plus the appendix with every stage output
    Full,
    /// Only the plan sections
    Plan,
    /// JSON output
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Full => OutputFormat::Full,
            FormatArg::Plan => OutputFormat::Plan,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for pm-assist
#[derive(Parser, Debug)]
#[command(name = "pm-assist")]
#[command(author, version, about = "Turn rough product ideas into structured product plans")]
#[command(long_about = r#"
PM Assist turns a rough product idea into a structured product plan.

The linear pipeline has up to four stages:
1. Validation: Check that the input is a product idea at all
2. Expansion: Explore the problem, users, features and value
3. Critique: Challenge assumptions and find gaps
4. Refinement: Synthesize everything into a structured plan

The guided mode instead proposes tech stacks, asks open questions one at a
time and writes a plan from your answers.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./pm-assist.toml         Project-level config
3. ~/.config/pm-assist/config.toml   Global config

Example:
  pm-assist generate "An app that matches dog owners with local walkers"
  pm-assist generate -d 1 -o walkers "Dog walking marketplace"
  pm-assist guided "A budgeting tool for freelancers"
  pm-assist files list
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a JSONL transcript of every model call to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the linear pipeline on an idea and save the plan
    Generate {
        /// The product idea
        idea: String,

        /// How many stages to run after validation (1-3)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
        depth: Option<u8>,

        /// File name for the saved plan (".md" is appended if missing)
        #[arg(short, long, value_name = "NAME")]
        output: Option<String>,

        /// How to print the result
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Start an interactive guided session
    Guided {
        /// Idea to start with (prompted for when omitted)
        idea: Option<String>,
    },

    /// Manage saved plan documents
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// Report credential and model configuration without calling the model
    Check,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// List saved plans, newest first
    List,
    /// Print a saved plan
    Show { name: String },
    /// Delete a saved plan
    Delete { name: String },
}
