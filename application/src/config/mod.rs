//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`DeliberationParams`]: model, sampling, decision rules, scheduling
//! - [`RetryPolicy`]: bounded exponential backoff for transient failures

pub mod deliberation_params;
pub mod retry;

pub use deliberation_params::{DEFAULT_TEMPERATURE, DeliberationParams};
pub use retry::RetryPolicy;
