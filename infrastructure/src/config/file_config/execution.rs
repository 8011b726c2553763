//! Execution configuration from TOML (`[execution]` section)

use jury_application::RetryPolicy;
use jury_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw execution configuration from TOML
///
/// # Example
///
/// ```toml
/// [execution]
/// fan_out = true              # query all roles of a round at once
/// max_concurrent_cases = 4
/// max_retries = 2
/// initial_backoff_ms = 500
/// max_backoff_ms = 8000
/// request_timeout_secs = 120  # 0 disables the timeout
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub fan_out: bool,
    pub max_concurrent_cases: usize,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            fan_out: false,
            max_concurrent_cases: 1,
            max_retries: 2,
            initial_backoff_ms: 500,
            max_backoff_ms: 8000,
            request_timeout_secs: 120,
        }
    }
}

impl FileExecutionConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_initial_backoff(Duration::from_millis(self.initial_backoff_ms))
            .with_max_backoff(Duration::from_millis(
                self.max_backoff_ms.max(self.initial_backoff_ms),
            ))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_concurrent_cases == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "execution.max_concurrent_cases".to_string(),
                    value: "0".to_string(),
                },
                "execution.max_concurrent_cases: must be at least 1",
            ));
        }

        if self.max_backoff_ms < self.initial_backoff_ms {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "execution.max_backoff_ms".to_string(),
                    value: self.max_backoff_ms.to_string(),
                },
                format!(
                    "execution.max_backoff_ms: {} is below initial_backoff_ms, using {}",
                    self.max_backoff_ms, self.initial_backoff_ms
                ),
            ));
        }

        issues
    }
}
