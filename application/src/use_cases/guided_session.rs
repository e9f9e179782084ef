//! Guided Session use case
//!
//! Drives a [`GuidedSession`] one user turn at a time. Every transition takes
//! the current session by reference and returns the next one, so a failed
//! model call leaves the caller holding the unchanged session to retry with.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::run_pipeline::tracked;
use crate::use_cases::stages::{StageError, StageRunner};
use pm_assist_domain::{
    CompletedSession, DomainError, GuidedSession, GuidedStep, Idea, Stage, StackChoices,
    StackSelection, TechStackOption,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while advancing a guided session
#[derive(Error, Debug)]
pub enum GuidedSessionError {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Cannot {operation} while the session is in step '{step}'")]
    InvalidStep {
        operation: &'static str,
        step: GuidedStep,
    },
}

/// What the caller should show the user after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum GuidedReply {
    /// Stacks to choose from (1-based when displayed)
    StackOptions { stacks: Vec<TechStackOption> },
    /// Selection was not understood; the session did not move
    Reprompt { message: String, max: usize },
    /// A stack was locked in and questioning starts
    StackSelected {
        stack: TechStackOption,
        auto: bool,
        first_question: String,
        total: usize,
    },
    /// The next open question. `number` is 1-based.
    NextQuestion {
        number: usize,
        total: usize,
        question: String,
    },
    /// The session is complete
    FinalPlan { plan: String },
}

/// Result of one turn
#[derive(Debug, Clone)]
pub struct Transition {
    pub session: GuidedSession,
    pub reply: GuidedReply,
}

impl Transition {
    fn new(session: GuidedSession, reply: GuidedReply) -> Self {
        Self { session, reply }
    }

    /// The finished session, if this turn completed it
    pub fn completed(&self) -> Option<&CompletedSession> {
        match &self.session {
            GuidedSession::Complete(done) => Some(done),
            _ => None,
        }
    }
}

/// Use case for the interactive guided flow
pub struct GuidedSessionUseCase<G: LlmGateway + 'static> {
    runner: StageRunner<G>,
}

impl<G: LlmGateway + 'static> GuidedSessionUseCase<G> {
    pub fn new(runner: StageRunner<G>) -> Self {
        Self { runner }
    }

    /// Expand the idea and propose tech stacks
    pub async fn start(&self, idea: Idea) -> Result<Transition, GuidedSessionError> {
        self.start_with_progress(idea, &NoProgress).await
    }

    pub async fn start_with_progress(
        &self,
        idea: Idea,
        progress: &dyn ProgressNotifier,
    ) -> Result<Transition, GuidedSessionError> {
        info!("Starting guided session");
        let expanded =
            tracked(progress, Stage::Expansion, 1, 2, self.runner.expand(&idea)).await?;
        let stacks =
            tracked(progress, Stage::TechStack, 2, 2, self.runner.tech_stacks(&idea)).await?;

        let session =
            GuidedSession::SelectStack(StackChoices::new(idea, expanded, stacks.clone())).present();
        Ok(Transition::new(
            session,
            GuidedReply::StackOptions { stacks },
        ))
    }

    /// Apply the user's stack selection.
    ///
    /// Unrecognized input produces a [`GuidedReply::Reprompt`] with the
    /// session unchanged and no model call.
    pub async fn select_stack(
        &self,
        session: &GuidedSession,
        input: &str,
    ) -> Result<Transition, GuidedSessionError> {
        self.select_stack_with_progress(session, input, &NoProgress)
            .await
    }

    pub async fn select_stack_with_progress(
        &self,
        session: &GuidedSession,
        input: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Transition, GuidedSessionError> {
        let choices = match session {
            GuidedSession::SelectStack(choices) | GuidedSession::AwaitingStackSelection(choices) => {
                choices
            }
            other => {
                return Err(GuidedSessionError::InvalidStep {
                    operation: "select a stack",
                    step: other.step(),
                });
            }
        };

        let (selection, stack) = match choices.select(input) {
            Ok(picked) => picked,
            Err(e) if e.is_reprompt() => {
                info!("Unrecognized stack selection: {:?}", input.trim());
                return Ok(Transition::new(
                    session.clone(),
                    GuidedReply::Reprompt {
                        message: e.to_string(),
                        max: choices.tech_stacks().len(),
                    },
                ));
            }
            Err(e) => return Err(e.into()),
        };
        info!("Selected stack: {}", stack.name);

        let questions = tracked(
            progress,
            Stage::OpenQuestions,
            1,
            1,
            self.runner
                .open_questions(choices.idea(), choices.expanded_idea(), stack),
        )
        .await?;

        let stack = stack.clone();
        let interview = choices.clone().into_interview(selection, questions)?;
        let first_question = interview.current_question().unwrap_or_default().to_string();
        let total = interview.questions().len();

        Ok(Transition::new(
            GuidedSession::AnswerQuestions(interview),
            GuidedReply::StackSelected {
                stack,
                auto: selection == StackSelection::Auto,
                first_question,
                total,
            },
        ))
    }

    /// Record an answer; the last one triggers the final plan
    pub async fn answer_question(
        &self,
        session: &GuidedSession,
        answer: &str,
    ) -> Result<Transition, GuidedSessionError> {
        self.answer_question_with_progress(session, answer, &NoProgress)
            .await
    }

    pub async fn answer_question_with_progress(
        &self,
        session: &GuidedSession,
        answer: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Transition, GuidedSessionError> {
        let GuidedSession::AnswerQuestions(interview) = session else {
            return Err(GuidedSessionError::InvalidStep {
                operation: "answer a question",
                step: session.step(),
            });
        };

        if !interview.is_last_question() {
            let mut next = interview.clone();
            let total = next.questions().len();
            let question = next.record_answer(answer).unwrap_or_default().to_string();
            let number = next.current_question_index() + 1;
            return Ok(Transition::new(
                GuidedSession::AnswerQuestions(next),
                GuidedReply::NextQuestion {
                    number,
                    total,
                    question,
                },
            ));
        }

        let answers = interview.pairs_with(answer);
        let plan = tracked(
            progress,
            Stage::GuidedPlan,
            1,
            1,
            self.runner.guided_plan(
                interview.idea(),
                interview.expanded_idea(),
                interview.selected_stack(),
                &answers,
            ),
        )
        .await?;

        info!("Guided session complete");
        let done = interview.clone().complete(answer, plan.clone());
        Ok(Transition::new(
            GuidedSession::Complete(done),
            GuidedReply::FinalPlan { plan },
        ))
    }

    /// Feed one line of user input to whichever step the session is in
    pub async fn advance(
        &self,
        session: &GuidedSession,
        input: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Transition, GuidedSessionError> {
        match session {
            GuidedSession::Initial { idea } => {
                self.start_with_progress(idea.clone(), progress).await
            }
            GuidedSession::SelectStack(_) | GuidedSession::AwaitingStackSelection(_) => {
                self.select_stack_with_progress(session, input, progress)
                    .await
            }
            GuidedSession::AnswerQuestions(_) => {
                self.answer_question_with_progress(session, input, progress)
                    .await
            }
            GuidedSession::Complete(_) => Err(GuidedSessionError::InvalidStep {
                operation: "continue",
                step: GuidedStep::Complete,
            }),
        }
    }
}
