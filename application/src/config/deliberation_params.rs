//! Deliberation parameters: use case control.
//!
//! [`DeliberationParams`] groups everything a deliberation needs besides the
//! roster and the gateway: which model to ask, how to sample, how to decide,
//! and how to schedule and retry calls. Values are injected explicitly by the
//! binary after configuration has been merged.

use super::retry::RetryPolicy;
use jury_domain::{Aggregator, Model};
use std::time::Duration;

/// Default sampling temperature for every role call.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Deliberation control parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `model`, `temperature`, `request_timeout` | JudgmentEngine |
/// | `aggregator`, `exclude_self`, `fan_out`, `retry` | RunDeliberationUseCase |
/// | `max_concurrent_cases` | RunDocketUseCase |
#[derive(Debug, Clone)]
pub struct DeliberationParams {
    /// Model every role is evaluated with.
    pub model: Model,
    /// Sampling temperature passed to the service.
    pub temperature: f32,
    /// Decision rules applied to round-2 verdicts.
    pub aggregator: Aggregator,
    /// Omit each role's own round-1 output from its confrontation transcript.
    pub exclude_self: bool,
    /// Issue the role calls of a round concurrently.
    pub fan_out: bool,
    /// Number of cases deliberated at once.
    pub max_concurrent_cases: usize,
    /// Retry policy for transient service failures.
    pub retry: RetryPolicy,
    /// Upper bound for a single service call.
    pub request_timeout: Option<Duration>,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            aggregator: Aggregator::default(),
            exclude_self: false,
            fan_out: false,
            max_concurrent_cases: 1,
            retry: RetryPolicy::default(),
            request_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl DeliberationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_exclude_self(mut self, exclude_self: bool) -> Self {
        self.exclude_self = exclude_self;
        self
    }

    pub fn with_fan_out(mut self, fan_out: bool) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Zero is clamped to one.
    pub fn with_max_concurrent_cases(mut self, max: usize) -> Self {
        self.max_concurrent_cases = max.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jury_domain::VoteRule;

    #[test]
    fn test_default() {
        let params = DeliberationParams::default();
        assert_eq!(params.model.as_str(), "gpt-4.1");
        assert!((params.temperature - 0.3).abs() < f32::EPSILON);
        assert!(!params.exclude_self);
        assert!(!params.fan_out);
        assert_eq!(params.max_concurrent_cases, 1);
        assert_eq!(params.aggregator.mutation_rule, VoteRule::Majority);
        assert_eq!(params.aggregator.faithful_rule, VoteRule::Unanimous);
        assert_eq!(params.request_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_builder() {
        let params = DeliberationParams::default()
            .with_model(Model::try_new("gpt-4o-mini").unwrap())
            .with_temperature(0.0)
            .with_exclude_self(true)
            .with_fan_out(true)
            .with_max_concurrent_cases(4)
            .with_retry(RetryPolicy::none())
            .with_request_timeout(None);

        assert_eq!(params.model.as_str(), "gpt-4o-mini");
        assert_eq!(params.temperature, 0.0);
        assert!(params.exclude_self);
        assert!(params.fan_out);
        assert_eq!(params.max_concurrent_cases, 4);
        assert_eq!(params.retry.max_retries, 0);
        assert!(params.request_timeout.is_none());
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let params = DeliberationParams::default().with_max_concurrent_cases(0);
        assert_eq!(params.max_concurrent_cases, 1);
    }
}
