//! Application layer for claim-jury
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeliberationParams, RetryPolicy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::judge_claim::JudgmentEngine;
pub use use_cases::run_deliberation::{DeliberationError, RunDeliberationUseCase};
pub use use_cases::run_docket::{CaseOutcome, RunDocketUseCase};
