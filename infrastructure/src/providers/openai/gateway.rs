//! OpenAI gateway
//!
//! Implements the `LlmGateway` port. Holds one pooled HTTP client; every
//! session created from it shares that client.

use super::session::OpenAiSession;
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use jury_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use jury_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    max_tokens: Option<u32>,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        max_tokens: Option<u32>,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        let api_key: String = api_key.into();

        Ok(Self {
            client,
            endpoint: Self::endpoint(base_url).into(),
            api_key: api_key.into(),
            max_tokens,
        })
    }

    /// Build the gateway from `[providers.openai]`.
    ///
    /// Fails when no API key is configured or present in the environment.
    pub fn from_config(config: &FileOpenAiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::Unauthorized(format!(
                "no API key: set {} or providers.openai.api_key",
                config.api_key_env
            ))
        })?;

        let gateway = Self::new(&config.base_url, api_key, config.max_tokens)?;
        info!(endpoint = %gateway.endpoint, "OpenAI provider initialized");
        Ok(gateway)
    }

    /// Chat completions URL; a trailing `/v1` on the base is tolerated.
    fn endpoint(base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{}/v1/chat/completions", base)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        temperature: f32,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.endpoint),
            Arc::clone(&self.api_key),
            model.clone(),
            system_prompt.to_string(),
            temperature,
            self.max_tokens,
        )))
    }
}
