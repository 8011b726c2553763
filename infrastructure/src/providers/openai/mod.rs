//! OpenAI-compatible chat completions provider
//!
//! Talks to `POST {base_url}/v1/chat/completions` with bearer authentication.
//! Works against OpenAI itself and any server exposing the same API.

mod error;
mod gateway;
mod session;
mod types;

pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;
