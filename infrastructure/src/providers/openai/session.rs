//! OpenAI session
//!
//! A session is one system prompt plus sampling settings. Every `send` is an
//! independent request; no history is kept between calls.

use super::error;
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use jury_application::ports::llm_gateway::{GatewayError, LlmSession};
use jury_domain::Model;
use std::sync::Arc;
use tracing::debug;

pub struct OpenAiSession {
    client: reqwest::Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    model: Model,
    system_prompt: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: Arc<str>,
        api_key: Arc<str>,
        model: Model,
        system_prompt: String,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            system_prompt,
            temperature,
            max_tokens,
        }
    }

    fn request<'a>(&'a self, content: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: self.model.as_str(),
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(content),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        debug!(
            model = %self.model,
            endpoint = %self.endpoint,
            "POST chat completion ({} chars)",
            content.len()
        );

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .bearer_auth(self.api_key.as_ref())
            .json(&self.request(content))
            .send()
            .await
            .map_err(error::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(model = %self.model, %status, "Chat completion rejected");
            return Err(error::from_status(status.as_u16(), &body));
        }

        let chat: ChatResponse = response.json().await.map_err(error::from_reqwest)?;

        chat.into_text().ok_or_else(|| {
            GatewayError::InvalidResponse("response contained no message content".to_string())
        })
    }
}
