//! LLM Gateway port
//!
//! Defines the interface for communicating with the reasoning service.

use async_trait::async_trait;
use jury_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request rejected with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::ConnectionError(_)
            | GatewayError::RateLimited(_)
            | GatewayError::Timeout => true,
            GatewayError::HttpStatus { status, .. } => *status == 408 || *status >= 500,
            GatewayError::Unauthorized(_)
            | GatewayError::ModelNotAvailable(_)
            | GatewayError::InvalidResponse(_)
            | GatewayError::RequestFailed(_)
            | GatewayError::Other(_) => false,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches the reasoning service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with a system prompt and sampling temperature
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        temperature: f32,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
