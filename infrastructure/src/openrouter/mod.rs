//! OpenRouter adapter
//!
//! Implements the [`LlmGateway`](pm_assist_application::LlmGateway) port over
//! an OpenAI-compatible chat completions endpoint.

pub mod gateway;
mod types;

pub use gateway::OpenRouterGateway;
