//! CLI entrypoint for pm-assist
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use pm_assist_application::{
    ConversationLogger, GuidedSessionUseCase, NoProgress, PlanRepository, ProgressNotifier,
    RunPipelineInput, RunPipelineUseCase, StageRunner,
};
use pm_assist_domain::{Depth, Idea, OutputFormat};
use pm_assist_infrastructure::{
    ConfigLoader, JsonlConversationLogger, MarkdownPlanStore, OpenRouterGateway,
};
use pm_assist_presentation::{
    Cli, Command, ConsoleFormatter, FilesCommand, GuidedRepl, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // .env is optional
    let _ = dotenv::dotenv();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        eprintln!("{} {}", "Warning:".yellow().bold(), issue.message);
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting pm-assist");

    // === Dependency Injection ===
    let gateway = Arc::new(OpenRouterGateway::from_config(&config.provider)?);
    let store: Arc<dyn PlanRepository> = Arc::new(MarkdownPlanStore::new(config.output.dir.clone()));

    let mut runner = StageRunner::new(Arc::clone(&gateway), config.pipeline_config());
    if let Some(path) = cli.log_file.as_ref().or(config.logging.conversation_log.as_ref()) {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("Failed to open conversation log {}", path.display()))?;
        info!("Writing conversation log to {}", path.display());
        runner = runner.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    let Some(command) = cli.command else {
        // No subcommand: behave like `guided`
        return guided(runner, store, None, cli.quiet).await;
    };

    match command {
        Command::Generate {
            idea,
            depth,
            output,
            format,
        } => {
            let depth = match depth {
                Some(d) => Depth::try_from(d)?,
                None => config.pipeline.parse_depth().0,
            };
            let format = format
                .map(OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default();
            generate(
                RunPipelineUseCase::new(runner),
                store.as_ref(),
                Idea::new(idea)?,
                depth,
                output.as_deref(),
                format,
                cli.quiet,
            )
            .await
        }
        Command::Guided { idea } => guided(runner, store, idea, cli.quiet).await,
        Command::Files { command } => files(store.as_ref(), command),
        Command::Check => {
            print!(
                "{}",
                ConsoleFormatter::format_check(
                    gateway.has_credential(),
                    &config.provider.api_key_env,
                    &config.pipeline_config().models,
                )
            );
            println!("\nPlans are saved to {}", config.output.dir.display());
            Ok(())
        }
    }
}

async fn generate(
    use_case: RunPipelineUseCase<OpenRouterGateway>,
    store: &dyn PlanRepository,
    idea: Idea,
    depth: Depth,
    filename: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let input = RunPipelineInput::new(idea).with_depth(depth);

    let progress: Box<dyn ProgressNotifier> = if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let result = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::format_result(&result, format));

    if !result.is_persistable() {
        return Ok(());
    }

    let path = store.save_result(&result, filename)?;
    // Keep stdout parseable for JSON output
    if format == OutputFormat::Json {
        eprintln!("Plan saved to {}", path.display());
    } else {
        println!("{} {}", "Plan saved to".green().bold(), path.display());
    }
    Ok(())
}

async fn guided(
    runner: StageRunner<OpenRouterGateway>,
    store: Arc<dyn PlanRepository>,
    idea: Option<String>,
    quiet: bool,
) -> Result<()> {
    let repl = GuidedRepl::new(GuidedSessionUseCase::new(runner), store).with_progress(!quiet);
    repl.run(idea).await?;
    Ok(())
}

fn files(store: &dyn PlanRepository, command: FilesCommand) -> Result<()> {
    match command {
        FilesCommand::List => {
            print!("{}", ConsoleFormatter::format_files(&store.list()?));
        }
        FilesCommand::Show { name } => {
            println!("{}", store.read(&name)?);
        }
        FilesCommand::Delete { name } => {
            store.delete(&name)?;
            println!("Deleted {}", name);
        }
    }
    Ok(())
}
