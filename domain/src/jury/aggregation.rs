//! Collapse final-round verdicts into one decision

use super::rule::VoteRule;
use super::verdict::{Decision, Verdict};
use serde::{Deserialize, Serialize};

/// Deterministic verdict aggregator
///
/// Priority order:
/// 1. Mutated votes satisfy `mutation_rule` → `Mutated`, even if others said Faithful
/// 2. Faithful votes satisfy `faithful_rule` → `Faithful`
/// 3. Otherwise → `Ambiguous`
///
/// Rules are evaluated against the number of verdicts, so the default
/// majority threshold is 2 for a three-role panel and 3 for a five-role panel.
///
/// # Example
///
/// ```
/// use jury_domain::{Aggregator, Decision, Verdict::*};
///
/// let aggregator = Aggregator::default();
/// assert_eq!(aggregator.decide(&[Mutated, Mutated, Faithful]), Decision::Mutated);
/// assert_eq!(aggregator.decide(&[Faithful, Faithful, Faithful]), Decision::Faithful);
/// assert_eq!(aggregator.decide(&[Faithful, Unclear, Mutated]), Decision::Ambiguous);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregator {
    pub mutation_rule: VoteRule,
    pub faithful_rule: VoteRule,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            mutation_rule: VoteRule::Majority,
            faithful_rule: VoteRule::Unanimous,
        }
    }
}

impl Aggregator {
    pub fn new(mutation_rule: VoteRule, faithful_rule: VoteRule) -> Self {
        Self {
            mutation_rule,
            faithful_rule,
        }
    }

    /// Decide the outcome for an ordered list of final-round verdicts
    pub fn decide(&self, verdicts: &[Verdict]) -> Decision {
        let total = verdicts.len();
        let mutated = verdicts.iter().filter(|v| **v == Verdict::Mutated).count();
        let faithful = verdicts.iter().filter(|v| **v == Verdict::Faithful).count();

        if self.mutation_rule.is_satisfied(mutated, total) {
            Decision::Mutated
        } else if self.faithful_rule.is_satisfied(faithful, total) {
            Decision::Faithful
        } else {
            Decision::Ambiguous
        }
    }
}
