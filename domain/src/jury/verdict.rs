//! Verdict, confidence and decision value objects

use serde::{Deserialize, Serialize};

/// Strip markdown emphasis and trailing punctuation from a label
fn normalize_label(label: &str) -> String {
    label
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, '*' | '_' | '`' | '"' | '\'' | '.' | '!')
        })
        .to_lowercase()
}

/// Per-role, per-round categorical judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Faithful,
    Mutated,
    Unclear,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Faithful => "Faithful",
            Verdict::Mutated => "Mutated",
            Verdict::Unclear => "Unclear",
        }
    }

    /// Map a free-form verdict label to a verdict.
    ///
    /// Case-insensitive; tolerates emphasis markers such as `**Mutated**`.
    /// Returns None for anything else, including the format placeholder
    /// `Faithful | Mutated | Unclear`.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "faithful" => Some(Verdict::Faithful),
            "mutated" => Some(Verdict::Mutated),
            "unclear" => Some(Verdict::Unclear),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            format!(
                "Unknown verdict: {}. Valid: Faithful, Mutated, Unclear",
                s
            )
        })
    }
}

/// Self-reported confidence of an evaluator (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final outcome for a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Faithful,
    Mutated,
    Ambiguous,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Faithful => "Faithful",
            Decision::Mutated => "Mutated",
            Decision::Ambiguous => "Ambiguous",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
