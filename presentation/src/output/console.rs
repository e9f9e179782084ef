//! Console output formatter for pipeline results and guided sessions

use colored::Colorize;
use pm_assist_application::{GuidedReply, StageModels, StoredPlan};
use pm_assist_domain::{OutputFormat, PipelineResult, Stage, TechStackOption};

/// Formats pipeline results and guided-session replies for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a pipeline result in the requested format
    pub fn format_result(result: &PipelineResult, format: OutputFormat) -> String {
        if let Some(reply) = result.simple_response.as_deref() {
            return match format {
                OutputFormat::Json => Self::format_json(result),
                _ => Self::format_simple(reply),
            };
        }

        match format {
            OutputFormat::Full => result.to_markdown(),
            OutputFormat::Plan => Self::format_plan(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &PipelineResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Plan sections only (concise output)
    pub fn format_plan(result: &PipelineResult) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Product Plan"));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {}\n\n",
            "Idea:".cyan().bold(),
            result.original_idea
        ));
        output.push_str(&result.plan.sections_markdown());
        output.push_str(&Self::footer());
        output
    }

    /// Reply for input that was not a product idea
    pub fn format_simple(reply: &str) -> String {
        format!("\n{}\n", reply)
    }

    /// What to print after a guided-session turn
    pub fn format_guided_reply(reply: &GuidedReply) -> String {
        match reply {
            GuidedReply::StackOptions { stacks } => Self::format_stack_options(stacks),
            GuidedReply::Reprompt { message, .. } => format!("{}\n", message.yellow()),
            GuidedReply::StackSelected {
                stack,
                auto,
                first_question,
                total,
            } => {
                let chosen = if *auto {
                    format!("{} {}", "Auto-selected:".green().bold(), stack.name.bold())
                } else {
                    format!("{} {}", "Selected:".green().bold(), stack.name.bold())
                };
                format!(
                    "\n{}\n{}\n\nI have {} questions to sharpen the plan.\n\n{}",
                    chosen,
                    stack.description.dimmed(),
                    total,
                    Self::question(1, *total, first_question)
                )
            }
            GuidedReply::NextQuestion {
                number,
                total,
                question,
            } => Self::question(*number, *total, question),
            GuidedReply::FinalPlan { plan } => format!(
                "\n{}\n\n{}\n{}",
                Self::header("Final Product Plan"),
                plan,
                Self::footer()
            ),
        }
    }

    fn format_stack_options(stacks: &[TechStackOption]) -> String {
        let mut output = Self::section_header("Tech Stack Options");
        for (i, stack) in stacks.iter().enumerate() {
            output.push_str(&format!(
                "\n{} {}\n   {}\n   {} {}\n",
                format!("{}.", i + 1).cyan().bold(),
                stack.name.bold(),
                stack.description,
                "Technologies:".dimmed(),
                stack.technologies_list()
            ));
            if !stack.pros.is_empty() {
                output.push_str(&Self::indent(&Self::list("+", &stack.pros), "   "));
                output.push('\n');
            }
            if !stack.cons.is_empty() {
                output.push_str(&Self::indent(&Self::list("-", &stack.cons), "   "));
                output.push('\n');
            }
        }
        output.push_str(&format!(
            "\nType the number (1-{}) to select a stack, or type \"auto\" to let me choose the best fit for you.\n",
            stacks.len()
        ));
        output
    }

    fn question(number: usize, total: usize, question: &str) -> String {
        format!(
            "{} {}\n",
            format!("Question {}/{}:", number, total).cyan().bold(),
            question
        )
    }

    /// Listing of saved plans
    pub fn format_files(plans: &[StoredPlan]) -> String {
        if plans.is_empty() {
            return "No saved plans.\n".to_string();
        }

        let mut output = String::new();
        for plan in plans {
            output.push_str(&format!(
                "{}  {:>8}  {}\n",
                plan.modified.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                Self::human_size(plan.size),
                plan.filename
            ));
        }
        output
    }

    /// Report for `check`: credential presence and per-stage models
    pub fn format_check(has_credential: bool, api_key_env: &str, models: &StageModels) -> String {
        let mut output = Self::section_header("Configuration Check");
        if has_credential {
            output.push_str(&format!("{} API key configured\n", "v".green()));
        } else {
            output.push_str(&format!(
                "{} API key missing (set {})\n",
                "x".red(),
                api_key_env
            ));
        }

        output.push_str(&format!("\n{}\n", "Stage models:".cyan().bold()));
        for stage in Stage::ALL {
            let settings = models.get(stage);
            output.push_str(&format!(
                "  {:<12} {} (temperature {:.1})\n",
                stage.as_str(),
                settings.model,
                settings.temperature
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn list(marker: &str, items: &[String]) -> String {
        items
            .iter()
            .map(|item| format!("{} {}", marker, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn human_size(bytes: u64) -> String {
        if bytes < 1024 {
            format!("{} B", bytes)
        } else {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
