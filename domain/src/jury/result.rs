//! Deliberation result for a single case

use super::aggregation::Aggregator;
use super::judgment::Judgment;
use super::verdict::{Decision, Verdict};
use crate::core::case::{Case, CaseId};
use serde::{Deserialize, Serialize};

/// Complete outcome of deliberating one case
///
/// Judgments are stored in roster order for both rounds. The final decision
/// is derived from the round-2 verdicts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliberationResult {
    pub case_id: CaseId,
    pub internal_fact: String,
    pub external_claim: String,
    pub round1: Vec<Judgment>,
    pub round2: Vec<Judgment>,
    pub final_decision: Decision,
}

impl DeliberationResult {
    /// Assemble a result, deciding from the round-2 judgments
    pub fn new(
        case: &Case,
        round1: Vec<Judgment>,
        round2: Vec<Judgment>,
        aggregator: &Aggregator,
    ) -> Self {
        let votes: Vec<Verdict> = round2.iter().map(Judgment::verdict).collect();
        let final_decision = aggregator.decide(&votes);

        Self {
            case_id: case.id(),
            internal_fact: case.internal_fact().to_string(),
            external_claim: case.external_claim().to_string(),
            round1,
            round2,
            final_decision,
        }
    }

    /// Ordered round-2 verdicts (roster order)
    pub fn round2_votes(&self) -> Vec<Verdict> {
        self.round2.iter().map(Judgment::verdict).collect()
    }

    /// Ordered round-1 verdicts (roster order)
    pub fn round1_votes(&self) -> Vec<Verdict> {
        self.round1.iter().map(Judgment::verdict).collect()
    }

    /// Roles whose verdict changed between rounds
    pub fn changed_minds(&self) -> Vec<&str> {
        self.round1
            .iter()
            .zip(&self.round2)
            .filter(|(before, after)| before.verdict() != after.verdict())
            .map(|(before, _)| before.role_name())
            .collect()
    }

    /// Total parse anomalies across both rounds
    pub fn anomaly_count(&self) -> usize {
        self.round1
            .iter()
            .chain(&self.round2)
            .map(|j| j.anomalies().len())
            .sum()
    }
}
