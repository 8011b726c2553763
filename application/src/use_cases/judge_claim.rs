//! Judgment engine
//!
//! Issues one evaluation request for one role and returns the raw answer.

use crate::config::DeliberationParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use jury_domain::{AgentRole, Case, Model, PromptTemplate};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Sends a role's evaluation of a case to the reasoning service
///
/// A fresh session is created per call, so no state leaks between roles,
/// rounds, or cases. The engine performs no retry.
pub struct JudgmentEngine<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    temperature: f32,
    request_timeout: Option<Duration>,
}

impl<G: LlmGateway + 'static> Clone for JudgmentEngine<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            model: self.model.clone(),
            temperature: self.temperature,
            request_timeout: self.request_timeout,
        }
    }
}

impl<G: LlmGateway + 'static> JudgmentEngine<G> {
    pub fn new(gateway: Arc<G>, model: Model, temperature: f32) -> Self {
        Self {
            gateway,
            model,
            temperature,
            request_timeout: None,
        }
    }

    pub fn from_params(gateway: Arc<G>, params: &DeliberationParams) -> Self {
        Self::new(gateway, params.model.clone(), params.temperature)
            .with_request_timeout(params.request_timeout)
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Evaluate `case` as `role`, optionally with a confrontation transcript
    ///
    /// Returns the response trimmed of surrounding whitespace.
    pub async fn evaluate(
        &self,
        role: &AgentRole,
        case: &Case,
        confrontation: Option<&str>,
    ) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::evaluation_prompt(case, confrontation);
        debug!(
            case = %case.id(),
            role = %role.name,
            model = %self.model,
            confrontation = confrontation.is_some(),
            "Sending evaluation request ({} chars)",
            prompt.len()
        );

        let request = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(&self.model, &role.instructions, self.temperature)
                .await?;
            session.send(&prompt).await
        };

        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| GatewayError::Timeout)??,
            None => request.await?,
        };

        Ok(response.trim().to_string())
    }
}
