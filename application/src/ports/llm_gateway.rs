//! LLM Gateway port
//!
//! Defines the interface for sending a single prompt to an LLM endpoint.

use async_trait::async_trait;
use pm_assist_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key configured ({0})")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the error is a local configuration problem rather than an
    /// upstream failure
    pub fn is_config(&self) -> bool {
        matches!(self, GatewayError::MissingCredential(_))
    }
}

/// Gateway for LLM communication
///
/// One call is one completion: no sessions, no streaming, no retries.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `prompt` to `model` and return the raw response text
    async fn invoke(
        &self,
        model: &Model,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError>;
}
