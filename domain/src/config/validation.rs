//! Configuration issues reported at startup.
//!
//! Loaders collect every problem they find instead of stopping at the first,
//! so the user sees all of them at once. `Error` issues abort the run;
//! `Warning` issues are printed and the affected value falls back to its default.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model name is empty or whitespace.
    EmptyModelName { field: String },
    /// A numeric value lies outside its accepted range.
    OutOfRange { field: String, value: String },
    /// A string value could not be parsed into its enum or rule type.
    InvalidValue { field: String, value: String },
    /// A configured role has an empty name.
    EmptyRoleName,
    /// Two configured roles share a name.
    DuplicateRoleName { name: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
