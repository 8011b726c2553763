//! Jury configuration from TOML (`[jury]` section)

use jury_domain::{
    AgentRole, AgentRoster, Aggregator, ConfigIssue, ConfigIssueCode, DomainError, VoteRule,
};
use serde::{Deserialize, Serialize};

/// One evaluator role from `[[jury.roles]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRoleConfig {
    pub name: String,
    pub instructions: String,
}

/// Raw jury configuration from TOML
///
/// # Example
///
/// ```toml
/// [jury]
/// exclude_self = false
/// mutation_rule = "majority"
/// faithful_rule = "unanimous"
///
/// [[jury.roles]]
/// name = "Statistician"
/// instructions = "You check every number and unit."
/// ```
///
/// Without `[[jury.roles]]` the built-in three-role panel is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJuryConfig {
    /// Omit each role's own round-1 output from its confrontation transcript
    pub exclude_self: bool,
    /// Rule the Mutated votes must satisfy
    pub mutation_rule: String,
    /// Rule the Faithful votes must satisfy
    pub faithful_rule: String,
    /// Custom roster (replaces the built-in panel when non-empty)
    pub roles: Vec<FileRoleConfig>,
}

impl Default for FileJuryConfig {
    fn default() -> Self {
        Self {
            exclude_self: false,
            mutation_rule: "majority".to_string(),
            faithful_rule: "unanimous".to_string(),
            roles: Vec::new(),
        }
    }
}

impl FileJuryConfig {
    fn parse_rule(field: &str, value: &str, fallback: VoteRule) -> (VoteRule, Vec<ConfigIssue>) {
        match value.parse::<VoteRule>() {
            Ok(rule) => (rule, vec![]),
            Err(reason) => (
                fallback,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidValue {
                        field: format!("jury.{}", field),
                        value: value.to_string(),
                    },
                    format!("jury.{}: {}", field, reason),
                )],
            ),
        }
    }

    /// Build the aggregator, falling back to the default rule for unparsable values.
    pub fn to_aggregator(&self) -> (Aggregator, Vec<ConfigIssue>) {
        let defaults = Aggregator::default();
        let (mutation_rule, mut issues) =
            Self::parse_rule("mutation_rule", &self.mutation_rule, defaults.mutation_rule);
        let (faithful_rule, faithful_issues) =
            Self::parse_rule("faithful_rule", &self.faithful_rule, defaults.faithful_rule);
        issues.extend(faithful_issues);

        (Aggregator::new(mutation_rule, faithful_rule), issues)
    }

    /// Build the roster; an invalid custom roster falls back to the built-in panel.
    pub fn to_roster(&self) -> (AgentRoster, Vec<ConfigIssue>) {
        if self.roles.is_empty() {
            return (AgentRoster::default_panel(), vec![]);
        }

        let roles = self
            .roles
            .iter()
            .map(|r| AgentRole::new(r.name.trim(), r.instructions.clone()))
            .collect();

        match AgentRoster::try_new(roles) {
            Ok(roster) => (roster, vec![]),
            Err(e) => {
                let code = match &e {
                    DomainError::DuplicateRole(name) => {
                        ConfigIssueCode::DuplicateRoleName { name: name.clone() }
                    }
                    _ => ConfigIssueCode::EmptyRoleName,
                };
                (
                    AgentRoster::default_panel(),
                    vec![ConfigIssue::error(code, format!("jury.roles: {}", e))],
                )
            }
        }
    }

    /// All issues in this section.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_aggregator().1;
        issues.extend(self.to_roster().1);
        issues
    }
}
