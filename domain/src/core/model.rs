//! Model value object representing the reasoning model

use serde::{Deserialize, Serialize};

/// Identifier of the model that evaluates claims (Value Object)
///
/// Model names are provider-specific strings (e.g. `gpt-4.1`), so this is a
/// thin wrapper rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub const DEFAULT_NAME: &'static str = "gpt-4.1";

    /// Create a model identifier, returning None for a blank name
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    fn default() -> Self {
        Self(Self::DEFAULT_NAME.to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
