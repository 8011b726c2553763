//! Reasoning service providers
//!
//! Adapters implementing the `LlmGateway` port.

pub mod openai;

pub use openai::OpenAiGateway;
