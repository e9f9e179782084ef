//! REPL (Read-Eval-Print Loop) for the guided session

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use pm_assist_application::{
    GuidedSessionUseCase, LlmGateway, NoProgress, PlanRepository, ProgressNotifier,
};
use pm_assist_domain::{GuidedSession, GuidedStep, Idea};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interactive guided-session REPL
///
/// Holds at most one session. A failed turn prints the error and keeps the
/// session as it was, so the same input can simply be retried.
pub struct GuidedRepl<G: LlmGateway + 'static> {
    use_case: GuidedSessionUseCase<G>,
    store: Arc<dyn PlanRepository>,
    show_progress: bool,
}

/// Outcome of one line of input
#[derive(Debug)]
enum TurnOutcome {
    Continue(Option<GuidedSession>),
    Saved(PathBuf),
}

impl<G: LlmGateway + 'static> GuidedRepl<G> {
    pub fn new(use_case: GuidedSessionUseCase<G>, store: Arc<dyn PlanRepository>) -> Self {
        Self {
            use_case,
            store,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL, optionally starting from `initial_idea`
    pub async fn run(&self, initial_idea: Option<String>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("pm-assist").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        let mut session: Option<GuidedSession> = None;
        if let Some(idea) = initial_idea.filter(|i| !i.trim().is_empty()) {
            println!("{} {}", "Idea:".cyan().bold(), idea.trim());
            session = self.step(session, &idea).await;
        }

        loop {
            let readline = rl.readline(Self::prompt(session.as_ref()));

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match line {
                            "/quit" | "/exit" | "/q" => {
                                println!("Bye!");
                                break;
                            }
                            "/reset" => {
                                session = None;
                                println!("Session discarded. Share a new idea to start over.");
                            }
                            "/help" | "/h" | "/?" => Self::print_help(),
                            _ => {
                                println!("Unknown command: {}", line);
                                println!("Type /help for available commands");
                            }
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    session = self.step(session, line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Process one line and print the outcome; returns the session to keep
    async fn step(&self, session: Option<GuidedSession>, line: &str) -> Option<GuidedSession> {
        println!();
        let outcome = if self.show_progress {
            let progress = ProgressReporter::new();
            self.turn(session.as_ref(), line, &progress).await
        } else {
            self.turn(session.as_ref(), line, &NoProgress).await
        };

        match outcome {
            Ok(TurnOutcome::Continue(next)) => next,
            Ok(TurnOutcome::Saved(path)) => {
                println!(
                    "{} {}\n",
                    "Plan saved to".green().bold(),
                    path.display()
                );
                println!("Share another idea to start a new session.");
                None
            }
            Err(message) => {
                eprintln!("{} {}", "Error:".red().bold(), message);
                session
            }
        }
    }

    /// Advance the session with `line`, printing the reply.
    ///
    /// Errors come back as display strings and leave `session` untouched.
    async fn turn(
        &self,
        session: Option<&GuidedSession>,
        line: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<TurnOutcome, String> {
        let transition = match session {
            None => {
                let idea = Idea::new(line).map_err(|e| e.to_string())?;
                self.use_case
                    .start_with_progress(idea, progress)
                    .await
                    .map_err(|e| e.to_string())?
            }
            Some(current) => self
                .use_case
                .advance(current, line, progress)
                .await
                .map_err(|e| e.to_string())?,
        };

        println!("{}", ConsoleFormatter::format_guided_reply(&transition.reply));
        debug!("Guided session now in step {}", transition.session.step());

        let Some(done) = transition.completed() else {
            return Ok(TurnOutcome::Continue(Some(transition.session)));
        };

        match self
            .store
            .save_markdown(done.final_plan(), chrono::Local::now(), None)
        {
            Ok(path) => Ok(TurnOutcome::Saved(path)),
            Err(e) => {
                warn!("Failed to save guided plan: {}", e);
                Err(format!("Plan generated but could not be saved: {}", e))
            }
        }
    }

    fn prompt(session: Option<&GuidedSession>) -> &'static str {
        match session.map(GuidedSession::step) {
            None | Some(GuidedStep::Initial) | Some(GuidedStep::Complete) => "idea> ",
            Some(GuidedStep::SelectStack) | Some(GuidedStep::AwaitingStackSelection) => "stack> ",
            Some(GuidedStep::AnswerQuestions) => "answer> ",
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          PM Assist - Guided Session         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Describe a product idea. I'll propose tech stacks, ask a few");
        println!("open questions, and write a plan from your answers.");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /reset           - Discard the current session");
        println!("  /quit, /exit, /q - Exit");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Local};
    use pm_assist_application::{
        GatewayError, PipelineConfig, StageRunner, StoreError, StoredPlan,
    };
    use pm_assist_domain::{Model, PipelineResult};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn invoke(
            &self,
            _model: &Model,
            _prompt: &str,
            _temperature: f32,
        ) -> Result<String, GatewayError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("no scripted response".into())))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<String>>,
    }

    impl PlanRepository for MemoryStore {
        fn save_result(
            &self,
            _result: &PipelineResult,
            _filename: Option<&str>,
        ) -> Result<PathBuf, StoreError> {
            Err(StoreError::SimpleResponse)
        }

        fn save_markdown(
            &self,
            markdown: &str,
            _timestamp: DateTime<Local>,
            _filename: Option<&str>,
        ) -> Result<PathBuf, StoreError> {
            self.saved.lock().unwrap().push(markdown.to_string());
            Ok(PathBuf::from("output/plan.md"))
        }

        fn list(&self) -> Result<Vec<StoredPlan>, StoreError> {
            Ok(vec![])
        }

        fn read(&self, filename: &str) -> Result<String, StoreError> {
            Err(StoreError::NotFound(filename.to_string()))
        }

        fn delete(&self, filename: &str) -> Result<(), StoreError> {
            Err(StoreError::NotFound(filename.to_string()))
        }
    }

    const STACKS: &str = r#"[
        {"name": "Modern Web", "description": "SPA", "technologies": ["React"], "pros": [], "cons": []},
        {"name": "Mobile-First", "description": "Native", "technologies": ["Swift"], "pros": [], "cons": []}
    ]"#;

    fn repl(
        responses: Vec<Result<String, GatewayError>>,
        store: Arc<MemoryStore>,
    ) -> GuidedRepl<ScriptedGateway> {
        let runner = StageRunner::new(
            Arc::new(ScriptedGateway::new(responses)),
            PipelineConfig::default(),
        );
        GuidedRepl::new(GuidedSessionUseCase::new(runner), store).with_progress(false)
    }

    fn continued(outcome: TurnOutcome) -> GuidedSession {
        match outcome {
            TurnOutcome::Continue(Some(session)) => session,
            other => panic!("expected a live session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_full_session_saves_plan() {
        let store = Arc::new(MemoryStore::default());
        let repl = repl(
            vec![
                Ok("expanded".into()),
                Ok(STACKS.into()),
                Ok(r#"["Who pays?", "Why now?"]"#.into()),
                Ok("# Product Plan\n\nFinal".into()),
            ],
            Arc::clone(&store),
        );

        let session = continued(repl.turn(None, "a recipe app", &NoProgress).await.unwrap());
        assert_eq!(GuidedRepl::<ScriptedGateway>::prompt(Some(&session)), "stack> ");

        let session = continued(repl.turn(Some(&session), "2", &NoProgress).await.unwrap());
        assert_eq!(GuidedRepl::<ScriptedGateway>::prompt(Some(&session)), "answer> ");

        let session = continued(repl.turn(Some(&session), "Gyms", &NoProgress).await.unwrap());
        let outcome = repl.turn(Some(&session), "AI", &NoProgress).await.unwrap();

        assert!(matches!(outcome, TurnOutcome::Saved(_)));
        assert_eq!(store.saved.lock().unwrap().as_slice(), ["# Product Plan\n\nFinal"]);
    }

    #[tokio::test]
    async fn test_failed_turn_reports_error() {
        let store = Arc::new(MemoryStore::default());
        let repl = repl(
            vec![Err(GatewayError::ConnectionError("refused".into()))],
            Arc::clone(&store),
        );

        let err = repl.turn(None, "a recipe app", &NoProgress).await.unwrap_err();
        assert!(err.contains("refused"));
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_step_keeps_session_on_error() {
        let store = Arc::new(MemoryStore::default());
        let repl = repl(
            vec![Ok("expanded".into()), Ok(STACKS.into())],
            Arc::clone(&store),
        );
        let session = repl.step(None, "a recipe app").await;
        assert!(session.is_some());

        // Questions generation has no scripted response left
        let kept = repl.step(session.clone(), "1").await;
        assert_eq!(kept, session);
    }

    #[test]
    fn test_prompt_without_session() {
        assert_eq!(GuidedRepl::<ScriptedGateway>::prompt(None), "idea> ");
    }
}
