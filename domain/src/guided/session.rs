//! Guided session state machine states.
//!
//! [`GuidedSession`] is owned by the caller and passed into every transition.
//! Each variant carries exactly the data that is valid in that step:
//!
//! ```text
//! Initial ──(expand + stacks)──▶ SelectStack ──present──▶ AwaitingStackSelection
//!                                                              │ valid pick
//!                                                              ▼
//!                     Complete ◀──(last answer + plan)── AnswerQuestions ◀─┐
//!                                                              └─(answer)──┘
//! ```
//!
//! The data-carrying transitions here are pure. The model calls that feed
//! them live in the application layer.

use super::selection::StackSelection;
use super::tech_stack::{QuestionAnswer, TechStackOption};
use crate::core::error::DomainError;
use crate::core::idea::Idea;
use serde::{Deserialize, Serialize};

/// Discriminant of [`GuidedSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidedStep {
    Initial,
    SelectStack,
    AwaitingStackSelection,
    AnswerQuestions,
    Complete,
}

impl GuidedStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuidedStep::Initial => "initial",
            GuidedStep::SelectStack => "select_stack",
            GuidedStep::AwaitingStackSelection => "awaiting_stack_selection",
            GuidedStep::AnswerQuestions => "answer_questions",
            GuidedStep::Complete => "complete",
        }
    }
}

impl std::fmt::Display for GuidedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A multi-turn guided brainstorming session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum GuidedSession {
    Initial { idea: Idea },
    SelectStack(StackChoices),
    AwaitingStackSelection(StackChoices),
    AnswerQuestions(Interview),
    Complete(CompletedSession),
}

impl GuidedSession {
    /// Create a session for a new idea
    pub fn new(idea: Idea) -> Self {
        GuidedSession::Initial { idea }
    }

    pub fn step(&self) -> GuidedStep {
        match self {
            GuidedSession::Initial { .. } => GuidedStep::Initial,
            GuidedSession::SelectStack(_) => GuidedStep::SelectStack,
            GuidedSession::AwaitingStackSelection(_) => GuidedStep::AwaitingStackSelection,
            GuidedSession::AnswerQuestions(_) => GuidedStep::AnswerQuestions,
            GuidedSession::Complete(_) => GuidedStep::Complete,
        }
    }

    pub fn idea(&self) -> &Idea {
        match self {
            GuidedSession::Initial { idea } => idea,
            GuidedSession::SelectStack(choices)
            | GuidedSession::AwaitingStackSelection(choices) => &choices.idea,
            GuidedSession::AnswerQuestions(interview) => &interview.idea,
            GuidedSession::Complete(done) => &done.idea,
        }
    }

    /// Move a freshly generated stack list to the awaiting-selection step.
    ///
    /// Any other step is returned unchanged.
    pub fn present(self) -> Self {
        match self {
            GuidedSession::SelectStack(choices) => GuidedSession::AwaitingStackSelection(choices),
            other => other,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, GuidedSession::Complete(_))
    }
}

/// Expanded idea plus the stack options offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackChoices {
    idea: Idea,
    expanded_idea: String,
    tech_stacks: Vec<TechStackOption>,
}

impl StackChoices {
    pub fn new(idea: Idea, expanded_idea: impl Into<String>, tech_stacks: Vec<TechStackOption>) -> Self {
        Self {
            idea,
            expanded_idea: expanded_idea.into(),
            tech_stacks,
        }
    }

    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    pub fn expanded_idea(&self) -> &str {
        &self.expanded_idea
    }

    pub fn tech_stacks(&self) -> &[TechStackOption] {
        &self.tech_stacks
    }

    /// Parse the user's selection against the offered stacks
    pub fn select(&self, input: &str) -> Result<(StackSelection, &TechStackOption), DomainError> {
        let selection = StackSelection::parse(input, self.tech_stacks.len())?;
        let option = self
            .tech_stacks
            .get(selection.index())
            .ok_or_else(|| DomainError::InvalidSelection {
                input: input.trim().to_string(),
                max: self.tech_stacks.len(),
            })?;
        Ok((selection, option))
    }

    /// Lock in `selection` and start asking `questions`.
    pub fn into_interview(
        self,
        selection: StackSelection,
        questions: Vec<String>,
    ) -> Result<Interview, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::NoQuestions);
        }
        let selected_stack = self
            .tech_stacks
            .get(selection.index())
            .cloned()
            .ok_or_else(|| DomainError::InvalidSelection {
                input: (selection.index() + 1).to_string(),
                max: self.tech_stacks.len(),
            })?;

        Ok(Interview {
            idea: self.idea,
            expanded_idea: self.expanded_idea,
            tech_stacks: self.tech_stacks,
            selected_stack,
            questions,
            answers: Vec::new(),
        })
    }
}

/// Open questions being asked one at a time
///
/// The current question index is the number of answers recorded so far, so
/// it always lies in `0..=questions.len()` and `answers[i]` exists exactly
/// for `i < index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InterviewData")]
pub struct Interview {
    idea: Idea,
    expanded_idea: String,
    tech_stacks: Vec<TechStackOption>,
    selected_stack: TechStackOption,
    questions: Vec<String>,
    answers: Vec<String>,
}

/// Unchecked wire form of [`Interview`]
#[derive(Deserialize)]
struct InterviewData {
    idea: Idea,
    expanded_idea: String,
    tech_stacks: Vec<TechStackOption>,
    selected_stack: TechStackOption,
    questions: Vec<String>,
    answers: Vec<String>,
}

impl TryFrom<InterviewData> for Interview {
    type Error = DomainError;

    fn try_from(data: InterviewData) -> Result<Self, Self::Error> {
        if data.questions.is_empty() {
            return Err(DomainError::NoQuestions);
        }
        if data.answers.len() > data.questions.len() {
            return Err(DomainError::InvalidInterview(format!(
                "{} answers for {} questions",
                data.answers.len(),
                data.questions.len()
            )));
        }
        Ok(Self {
            idea: data.idea,
            expanded_idea: data.expanded_idea,
            tech_stacks: data.tech_stacks,
            selected_stack: data.selected_stack,
            questions: data.questions,
            answers: data.answers,
        })
    }
}

impl Interview {
    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    pub fn expanded_idea(&self) -> &str {
        &self.expanded_idea
    }

    pub fn tech_stacks(&self) -> &[TechStackOption] {
        &self.tech_stacks
    }

    pub fn selected_stack(&self) -> &TechStackOption {
        &self.selected_stack
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn current_question_index(&self) -> usize {
        self.answers.len()
    }

    pub fn current_question(&self) -> Option<&str> {
        self.questions
            .get(self.current_question_index())
            .map(String::as_str)
    }

    /// Whether the next answer is the final one
    pub fn is_last_question(&self) -> bool {
        self.current_question_index() + 1 >= self.questions.len()
    }

    /// Record the answer to the current question and return the next one.
    ///
    /// Returns `None` (and records nothing) when every question is already
    /// answered.
    pub fn record_answer(&mut self, answer: impl Into<String>) -> Option<&str> {
        if self.current_question_index() >= self.questions.len() {
            return None;
        }
        self.answers.push(answer.into());
        self.current_question()
    }

    /// Question/answer pairs including a pending final answer
    pub fn pairs_with(&self, final_answer: &str) -> Vec<QuestionAnswer> {
        self.questions
            .iter()
            .zip(
                self.answers
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(final_answer)),
            )
            .map(|(q, a)| QuestionAnswer::new(q.as_str(), a))
            .collect()
    }

    /// Finish the interview with the last answer and the generated plan
    pub fn complete(self, final_answer: &str, final_plan: impl Into<String>) -> CompletedSession {
        let answers = self.pairs_with(final_answer);
        CompletedSession {
            idea: self.idea,
            expanded_idea: self.expanded_idea,
            selected_stack: self.selected_stack,
            answers,
            final_plan: final_plan.into(),
        }
    }
}

/// Terminal state: the final guided plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    idea: Idea,
    expanded_idea: String,
    selected_stack: TechStackOption,
    answers: Vec<QuestionAnswer>,
    final_plan: String,
}

impl CompletedSession {
    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    pub fn expanded_idea(&self) -> &str {
        &self.expanded_idea
    }

    pub fn selected_stack(&self) -> &TechStackOption {
        &self.selected_stack
    }

    pub fn answers(&self) -> &[QuestionAnswer] {
        &self.answers
    }

    pub fn final_plan(&self) -> &str {
        &self.final_plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str) -> TechStackOption {
        TechStackOption {
            name: name.to_string(),
            description: format!("{name} description"),
            technologies: vec!["Rust".to_string()],
            pros: vec![],
            cons: vec![],
        }
    }

    fn choices() -> StackChoices {
        StackChoices::new(
            Idea::new("a recipe app").unwrap(),
            "expanded",
            vec![stack("Web"), stack("Mobile"), stack("Prototype")],
        )
    }

    fn questions() -> Vec<String> {
        vec!["Who pays?".to_string(), "Why now?".to_string(), "MVP?".to_string()]
    }

    #[test]
    fn test_new_session_is_initial() {
        let session = GuidedSession::new(Idea::new("idea").unwrap());
        assert_eq!(session.step(), GuidedStep::Initial);
        assert_eq!(session.idea().content(), "idea");
    }

    #[test]
    fn test_present_moves_to_awaiting() {
        let session = GuidedSession::SelectStack(choices()).present();
        assert_eq!(session.step(), GuidedStep::AwaitingStackSelection);

        let initial = GuidedSession::new(Idea::new("idea").unwrap()).present();
        assert_eq!(initial.step(), GuidedStep::Initial);
    }

    #[test]
    fn test_select_auto_and_index() {
        let choices = choices();
        let (selection, option) = choices.select("auto").unwrap();
        assert_eq!(selection, StackSelection::Auto);
        assert_eq!(option.name, "Web");

        let (_, option) = choices.select("2").unwrap();
        assert_eq!(option.name, "Mobile");

        assert!(choices.select("5").is_err());
    }

    #[test]
    fn test_into_interview_requires_questions() {
        assert_eq!(
            choices().into_interview(StackSelection::Auto, vec![]),
            Err(DomainError::NoQuestions)
        );
    }

    #[test]
    fn test_interview_progression() {
        let mut interview = choices()
            .into_interview(StackSelection::Index(1), questions())
            .unwrap();
        assert_eq!(interview.selected_stack().name, "Mobile");
        assert_eq!(interview.current_question_index(), 0);
        assert_eq!(interview.current_question(), Some("Who pays?"));
        assert!(!interview.is_last_question());

        assert_eq!(interview.record_answer("Parents"), Some("Why now?"));
        assert_eq!(interview.current_question_index(), 1);
        assert_eq!(interview.answers(), ["Parents".to_string()]);

        interview.record_answer("Inflation");
        assert!(interview.is_last_question());
        assert_eq!(interview.current_question(), Some("MVP?"));

        let pairs = interview.pairs_with("Meal planner");
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], QuestionAnswer::new("MVP?", "Meal planner"));

        let done = interview.complete("Meal planner", "# Product Plan");
        assert_eq!(done.answers().len(), 3);
        assert_eq!(done.final_plan(), "# Product Plan");
    }

    #[test]
    fn test_record_answer_never_exceeds_questions() {
        let mut interview = choices()
            .into_interview(StackSelection::Auto, vec!["Only?".to_string()])
            .unwrap();
        assert_eq!(interview.record_answer("yes"), None);
        assert_eq!(interview.current_question_index(), 1);
        assert_eq!(interview.record_answer("again"), None);
        assert_eq!(interview.current_question_index(), 1);
    }

    #[test]
    fn test_interview_round_trips_through_serde() {
        let mut interview = choices()
            .into_interview(StackSelection::Auto, questions())
            .unwrap();
        interview.record_answer("Parents");
        let session = GuidedSession::AnswerQuestions(interview);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["step"], "answer_questions");
        let back: GuidedSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_stored_interview_must_keep_index_in_range() {
        let interview = choices()
            .into_interview(StackSelection::Auto, questions())
            .unwrap();
        let valid = serde_json::to_value(GuidedSession::AnswerQuestions(interview)).unwrap();

        let mut no_questions = valid.clone();
        no_questions["questions"] = serde_json::json!([]);
        no_questions["answers"] = serde_json::json!(["a", "b"]);
        assert!(serde_json::from_value::<GuidedSession>(no_questions).is_err());

        let mut too_many = valid;
        too_many["answers"] = serde_json::json!(["a", "b", "c", "d"]);
        let err = serde_json::from_value::<GuidedSession>(too_many).unwrap_err();
        assert!(err.to_string().contains("4 answers for 3 questions"));
    }

    #[test]
    fn test_session_serializes_with_step_tag() {
        let session = GuidedSession::AwaitingStackSelection(choices());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["step"], "awaiting_stack_selection");
        let back: GuidedSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
