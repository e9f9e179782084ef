//! Stage runner
//!
//! Every model-invoking stage goes through [`StageRunner`]: build the prompt,
//! call the gateway with the stage's model and temperature, then turn the raw
//! text into a typed value. The use cases decide which stages run and in
//! what order.

use crate::config::PipelineConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use pm_assist_domain::core::string::preview;
use pm_assist_domain::validation::filler::classify_filler;
use pm_assist_domain::{
    ExtractionError, Idea, ProductPlan, PromptTemplate, QuestionAnswer, Stage, TechStackOption,
    ValidationVerdict, extract_as,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasoning recorded when validation fails open
const FAIL_OPEN_REASONING: &str = "Validation error - proceeding with generation";

/// Errors a stage can report
#[derive(Error, Debug)]
pub enum StageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: GatewayError,
    },

    #[error("{stage} returned unusable output: {source}")]
    Extraction {
        stage: Stage,
        #[source]
        source: ExtractionError,
    },

    #[error("Refinement did not return a valid plan: {0}")]
    PlanFormat(#[source] ExtractionError),
}

impl StageError {
    fn from_gateway(stage: Stage, error: GatewayError) -> Self {
        if error.is_config() {
            StageError::Config(error.to_string())
        } else {
            StageError::Upstream {
                stage,
                source: error,
            }
        }
    }

    fn extraction(stage: Stage, source: ExtractionError) -> Self {
        StageError::Extraction { stage, source }
    }

    /// The stage the error came from, when known
    pub fn stage(&self) -> Option<Stage> {
        match self {
            StageError::Config(_) => None,
            StageError::Upstream { stage, .. } | StageError::Extraction { stage, .. } => {
                Some(*stage)
            }
            StageError::PlanFormat(_) => Some(Stage::Refinement),
        }
    }
}

/// Runs individual stages against an [`LlmGateway`]
pub struct StageRunner<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    config: PipelineConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for StageRunner<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: self.config.clone(),
            conversation_logger: Arc::clone(&self.conversation_logger),
        }
    }
}

impl<G: LlmGateway + 'static> StageRunner<G> {
    pub fn new(gateway: Arc<G>, config: PipelineConfig) -> Self {
        Self {
            gateway,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Send `prompt` with the settings configured for `stage`
    async fn call(&self, stage: Stage, prompt: &str) -> Result<String, StageError> {
        let settings = self.config.models.get(stage);
        info!("Stage {}: calling {}", stage.as_str(), settings.model);

        self.conversation_logger.log(ConversationEvent::new(
            "stage_prompt",
            serde_json::json!({
                "stage": stage.as_str(),
                "model": settings.model.to_string(),
                "temperature": settings.temperature,
                "prompt": prompt,
            }),
        ));

        match self
            .gateway
            .invoke(&settings.model, prompt, settings.temperature)
            .await
        {
            Ok(text) => {
                debug!("Raw {} response: {}", stage.as_str(), preview(&text, 500));
                self.conversation_logger.log(ConversationEvent::new(
                    "stage_response",
                    serde_json::json!({
                        "stage": stage.as_str(),
                        "model": settings.model.to_string(),
                        "bytes": text.len(),
                        "response": text,
                    }),
                ));
                Ok(text)
            }
            Err(e) => {
                warn!("Stage {} failed: {}", stage.as_str(), e);
                self.conversation_logger.log(ConversationEvent::new(
                    "stage_error",
                    serde_json::json!({
                        "stage": stage.as_str(),
                        "model": settings.model.to_string(),
                        "error": e.to_string(),
                    }),
                ));
                Err(StageError::from_gateway(stage, e))
            }
        }
    }

    /// Classify the idea.
    ///
    /// Single filler words are answered locally. Otherwise the model decides;
    /// with a fail-open policy any failure along that path counts as valid.
    pub async fn validate(&self, idea: &Idea) -> Result<ValidationVerdict, StageError> {
        if let Some(verdict) = classify_filler(idea.content()) {
            info!("Filler input detected, skipping model validation");
            return Ok(verdict);
        }

        let outcome = match self
            .call(Stage::Validation, &PromptTemplate::validation(idea.content()))
            .await
        {
            Ok(raw) => ValidationVerdict::from_model_output(&raw)
                .map_err(|e| StageError::extraction(Stage::Validation, e)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(verdict) => {
                info!(
                    "Validation result: {} ({})",
                    if verdict.is_valid { "valid" } else { "not valid" },
                    verdict.reasoning
                );
                Ok(verdict)
            }
            Err(e) if self.config.validation.fail_open => {
                warn!("Validation failed, proceeding anyway: {}", e);
                Ok(ValidationVerdict::proceed(FAIL_OPEN_REASONING))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn expand(&self, idea: &Idea) -> Result<String, StageError> {
        self.call(Stage::Expansion, &PromptTemplate::expansion(idea.content()))
            .await
    }

    pub async fn critique(&self, expanded_idea: &str) -> Result<String, StageError> {
        self.call(Stage::Critique, &PromptTemplate::critique(expanded_idea))
            .await
    }

    /// Synthesize the structured plan. Nothing is fabricated on bad output.
    pub async fn refine(
        &self,
        expanded_idea: &str,
        critique: &str,
    ) -> Result<ProductPlan, StageError> {
        let raw = self
            .call(
                Stage::Refinement,
                &PromptTemplate::refinement(expanded_idea, critique),
            )
            .await?;
        extract_as::<ProductPlan>(&raw).map_err(StageError::PlanFormat)
    }

    pub async fn tech_stacks(&self, idea: &Idea) -> Result<Vec<TechStackOption>, StageError> {
        let raw = self
            .call(Stage::TechStack, &PromptTemplate::tech_stacks(idea.content()))
            .await?;
        let stacks = extract_as::<Vec<TechStackOption>>(&raw)
            .map_err(|e| StageError::extraction(Stage::TechStack, e))?;
        if stacks.is_empty() {
            return Err(StageError::extraction(
                Stage::TechStack,
                ExtractionError::new("No tech stack options returned", &raw),
            ));
        }
        info!("Generated {} tech stack options", stacks.len());
        Ok(stacks)
    }

    pub async fn open_questions(
        &self,
        idea: &Idea,
        expanded_idea: &str,
        stack: &TechStackOption,
    ) -> Result<Vec<String>, StageError> {
        let raw = self
            .call(
                Stage::OpenQuestions,
                &PromptTemplate::open_questions(idea.content(), expanded_idea, stack),
            )
            .await?;
        let questions = extract_as::<Vec<String>>(&raw)
            .map_err(|e| StageError::extraction(Stage::OpenQuestions, e))?;
        if questions.is_empty() {
            return Err(StageError::extraction(
                Stage::OpenQuestions,
                ExtractionError::new("No open questions returned", &raw),
            ));
        }
        info!("Generated {} open questions", questions.len());
        Ok(questions)
    }

    /// Final markdown plan, returned verbatim
    pub async fn guided_plan(
        &self,
        idea: &Idea,
        expanded_idea: &str,
        stack: &TechStackOption,
        answers: &[QuestionAnswer],
    ) -> Result<String, StageError> {
        let raw = self
            .call(
                Stage::GuidedPlan,
                &PromptTemplate::guided_plan(idea.content(), expanded_idea, stack, answers),
            )
            .await?;
        if raw.trim().is_empty() {
            return Err(StageError::extraction(
                Stage::GuidedPlan,
                ExtractionError::new("Empty plan returned", &raw),
            ));
        }
        Ok(raw)
    }
}
