//! Application layer for pm-assist
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PipelineConfig, StageModels, StageSettings, ValidationPolicy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    plan_repository::{PlanRepository, StoreError, StoredPlan},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::guided_session::{
    GuidedReply, GuidedSessionError, GuidedSessionUseCase, Transition,
};
pub use use_cases::run_pipeline::{RunPipelineInput, RunPipelineUseCase};
pub use use_cases::stages::{StageError, StageRunner};
