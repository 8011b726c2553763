//! Prompt domain
//!
//! Templates for the evaluation request and the confrontation transcript.

mod template;

pub use template::PromptTemplate;
