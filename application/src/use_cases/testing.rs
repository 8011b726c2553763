//! Scripted gateway shared by use case tests.
//!
//! Replies are keyed by `(system prompt, round)`. The round is inferred from
//! whether the user prompt carries a confrontation transcript. Each key holds a
//! queue; the last entry repeats once the queue is down to one.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use jury_domain::{Model, PromptTemplate, Round};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Script = HashMap<(String, Round), VecDeque<Result<String, GatewayError>>>;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub round: Round,
}

#[derive(Default)]
struct State {
    script: Script,
    calls: Vec<RecordedCall>,
    delays: HashMap<String, Duration>,
}

pub(crate) struct ScriptedGateway {
    state: Arc<Mutex<State>>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            delay: None,
        }
    }

    pub fn reply(self, system_prompt: &str, round: Round, text: &str) -> Self {
        self.push(system_prompt, round, Ok(text.to_string()))
    }

    pub fn fail(self, system_prompt: &str, round: Round, error: GatewayError) -> Self {
        self.push(system_prompt, round, Err(error))
    }

    /// Delay every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay replies for one system prompt only
    pub fn with_delay_for(self, system_prompt: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(system_prompt.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_for(&self, system_prompt: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.system_prompt == system_prompt)
            .count()
    }

    fn push(self, system_prompt: &str, round: Round, reply: Result<String, GatewayError>) -> Self {
        self.state
            .lock()
            .unwrap()
            .script
            .entry((system_prompt.to_string(), round))
            .or_default()
            .push_back(reply);
        self
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        temperature: f32,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            state: Arc::clone(&self.state),
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            temperature,
            delay: self.delay,
        }))
    }
}

struct ScriptedSession {
    state: Arc<Mutex<State>>,
    model: Model,
    system_prompt: String,
    temperature: f32,
    delay: Option<Duration>,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let round = if content.contains(PromptTemplate::CONFRONTATION_HEADER) {
            Round::Confrontation
        } else {
            Round::Initial
        };

        let (reply, delay) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                model: self.model.to_string(),
                system_prompt: self.system_prompt.clone(),
                user_prompt: content.to_string(),
                temperature: self.temperature,
                round,
            });
            let delay = state.delays.get(&self.system_prompt).copied().or(self.delay);
            let reply = match state.script.get_mut(&(self.system_prompt.clone(), round)) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            (reply, delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        reply.unwrap_or_else(|| {
            Err(GatewayError::Other(format!(
                "no scripted reply for '{}' in {}",
                self.system_prompt, round
            )))
        })
    }
}
