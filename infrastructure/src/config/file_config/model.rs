//! Model configuration from TOML (`[model]` section)

use jury_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Raw model configuration from TOML
///
/// # Example
///
/// ```toml
/// [model]
/// name = "gpt-4.1"
/// temperature = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model every role is evaluated with
    pub name: String,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: Model::DEFAULT_NAME.to_string(),
            temperature: 0.3,
        }
    }
}

impl FileModelConfig {
    /// Parse the model name, collecting an issue when it is empty.
    pub fn parse_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        match Model::try_new(&self.name) {
            Some(model) => (Some(model), vec![]),
            None => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: "model.name".to_string(),
                    },
                    "model.name: model name cannot be empty",
                )],
            ),
        }
    }

    /// Check the temperature range.
    pub fn temperature_issues(&self) -> Vec<ConfigIssue> {
        if (0.0..=2.0).contains(&self.temperature) {
            vec![]
        } else {
            vec![ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "model.temperature".to_string(),
                    value: self.temperature.to_string(),
                },
                format!(
                    "model.temperature: {} is outside 0.0..=2.0",
                    self.temperature
                ),
            )]
        }
    }
}
