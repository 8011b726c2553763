//! Judgment entity: one role's answer in one round

use super::parsing::{ParseAnomaly, parse_judgment};
use super::verdict::{Confidence, Verdict};
use serde::{Deserialize, Serialize};

/// Deliberation round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Round {
    /// Independent judgment
    Initial,
    /// Re-judgment after seeing every role's round-1 output
    Confrontation,
}

impl Round {
    pub fn number(&self) -> u8 {
        match self {
            Round::Initial => 1,
            Round::Confrontation => 2,
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

impl TryFrom<u8> for Round {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::Initial),
            2 => Ok(Round::Confrontation),
            other => Err(format!("Invalid round: {}", other)),
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round {}", self.number())
    }
}

/// One role's parsed answer for one case in one round
///
/// Created once from the raw response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    role_name: String,
    round: Round,
    raw_text: String,
    verdict: Verdict,
    confidence: Option<Confidence>,
    key_arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    anomalies: Vec<ParseAnomaly>,
}

impl Judgment {
    /// Parse a raw evaluator response into a judgment
    pub fn from_response(role_name: impl Into<String>, round: Round, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let parsed = parse_judgment(&raw_text);

        Self {
            role_name: role_name.into(),
            round,
            raw_text,
            verdict: parsed.verdict,
            confidence: parsed.confidence,
            key_arguments: parsed.key_arguments,
            anomalies: parsed.anomalies,
        }
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    pub fn key_arguments(&self) -> &[String] {
        &self.key_arguments
    }

    pub fn anomalies(&self) -> &[ParseAnomaly] {
        &self.anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response() {
        let judgment = Judgment::from_response(
            "Context Guardian",
            Round::Initial,
            "Verdict: Mutated\nConfidence: High\nKey Arguments:\n- Drops the survey population",
        );

        assert_eq!(judgment.role_name(), "Context Guardian");
        assert_eq!(judgment.round(), Round::Initial);
        assert_eq!(judgment.verdict(), Verdict::Mutated);
        assert_eq!(judgment.confidence(), Some(Confidence::High));
        assert_eq!(judgment.key_arguments(), ["Drops the survey population"]);
        assert!(judgment.anomalies().is_empty());
    }

    #[test]
    fn test_from_unparseable_response() {
        let judgment = Judgment::from_response("Judge", Round::Confrontation, "no idea");

        assert_eq!(judgment.verdict(), Verdict::Unclear);
        assert_eq!(judgment.raw_text(), "no idea");
        assert!(judgment.anomalies().contains(&ParseAnomaly::MissingVerdict));
    }

    #[test]
    fn test_round_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Round::Initial).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Round::Confrontation).unwrap(), "2");

        let round: Round = serde_json::from_str("2").unwrap();
        assert_eq!(round, Round::Confrontation);
        assert!(serde_json::from_str::<Round>("3").is_err());
    }

    #[test]
    fn test_round_display() {
        assert_eq!(Round::Initial.to_string(), "Round 1");
    }
}
