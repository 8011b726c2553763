//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod dataset;
mod execution;
mod jury;
mod model;
mod output;
mod providers;

pub use dataset::FileDatasetConfig;
pub use execution::FileExecutionConfig;
pub use jury::{FileJuryConfig, FileRoleConfig};
pub use model::FileModelConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileOpenAiConfig, FileProvidersConfig};

use jury_application::DeliberationParams;
use jury_domain::{AgentRoster, ConfigIssue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used at all
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration:\n  {}", summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model and sampling
    pub model: FileModelConfig,
    /// Roster and decision rules
    pub jury: FileJuryConfig,
    /// Scheduling, retry and timeouts
    pub execution: FileExecutionConfig,
    /// Input CSV and row selection
    pub dataset: FileDatasetConfig,
    /// Reasoning service settings
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Empty model name and temperature range
    /// 2. Vote rules and custom roles
    /// 3. Execution limits
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.model.parse_model().1);
        issues.extend(self.model.temperature_issues());
        issues.extend(self.jury.validate());
        issues.extend(self.execution.validate());

        issues
    }

    /// Fail when any issue is an error; warnings are returned for display.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            let errors = issues.into_iter().filter(ConfigIssue::is_error).collect();
            return Err(ConfigValidationError::Invalid(errors));
        }
        Ok(issues)
    }

    /// Roster to deliberate with (built-in panel unless roles are configured)
    pub fn roster(&self) -> AgentRoster {
        self.jury.to_roster().0
    }

    /// Deliberation parameters; invalid values fall back to defaults
    pub fn deliberation_params(&self) -> DeliberationParams {
        let defaults = DeliberationParams::default();

        DeliberationParams::default()
            .with_model(self.model.parse_model().0.unwrap_or(defaults.model))
            .with_temperature(self.model.temperature.clamp(0.0, 2.0))
            .with_aggregator(self.jury.to_aggregator().0)
            .with_exclude_self(self.jury.exclude_self)
            .with_fan_out(self.execution.fan_out)
            .with_max_concurrent_cases(self.execution.max_concurrent_cases)
            .with_retry(self.execution.retry_policy())
            .with_request_timeout(self.execution.request_timeout())
    }
}
