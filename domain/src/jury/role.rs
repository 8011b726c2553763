//! Evaluator roles and the ordered jury roster

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An evaluator persona: a unique name plus the instructions it is given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRole {
    pub name: String,
    pub instructions: String,
}

impl AgentRole {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    pub fn pedantic_fact_checker() -> Self {
        Self::new(
            "Pedantic Fact-Checker",
            r#"You are a strict, pedantic fact-checker.
Your job is to assess literal factual faithfulness.

Focus on:
- Exact numbers
- Precise wording
- Logical equivalence

Do NOT consider whether simplification is reasonable."#,
        )
    }

    pub fn context_guardian() -> Self {
        Self::new(
            "Context Guardian",
            r#"You are a context-focused analyst.
Your job is to identify missing qualifiers or scope shifts.

Focus on:
- Population, timeframe, geography
- Correlation vs causation
- What is omitted but important"#,
        )
    }

    pub fn common_sense_judge() -> Self {
        Self::new(
            "Common-Sense Judge",
            r#"You represent an average, reasonable reader.
Your job is to judge whether the external claim would mislead most people.

Focus on:
- Practical interpretation
- Overall meaning
- Reader takeaway"#,
        )
    }
}

/// Ordered, immutable panel of evaluator roles
///
/// Order is significant: it fixes evaluation order, report order and the
/// section order of the confrontation transcript. There is no mutation API;
/// build a new roster to change the panel.
///
/// # Example
///
/// ```
/// use jury_domain::{AgentRole, AgentRoster};
///
/// let roster = AgentRoster::default_panel();
/// assert_eq!(roster.len(), 3);
/// assert_eq!(roster.names(), vec!["Pedantic Fact-Checker", "Context Guardian", "Common-Sense Judge"]);
///
/// let dup = AgentRoster::try_new(vec![AgentRole::new("A", "x"), AgentRole::new("A", "y")]);
/// assert!(dup.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRoster {
    roles: Vec<AgentRole>,
}

impl AgentRoster {
    /// Build a roster, enforcing a non-empty panel of distinct, non-blank names
    pub fn try_new(roles: Vec<AgentRole>) -> Result<Self, DomainError> {
        if roles.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for role in &roles {
            if role.name.trim().is_empty() {
                return Err(DomainError::EmptyRoleName);
            }
            if !seen.insert(role.name.as_str()) {
                return Err(DomainError::DuplicateRole(role.name.clone()));
            }
        }

        Ok(Self { roles })
    }

    /// The standard three-role panel
    pub fn default_panel() -> Self {
        Self {
            roles: vec![
                AgentRole::pedantic_fact_checker(),
                AgentRole::context_guardian(),
                AgentRole::common_sense_judge(),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentRole> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AgentRole> {
        self.roles.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::default_panel()
    }
}

impl<'a> IntoIterator for &'a AgentRoster {
    type Item = &'a AgentRole;
    type IntoIter = std::slice::Iter<'a, AgentRole>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.iter()
    }
}
