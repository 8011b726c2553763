//! Verdict response parsing.
//!
//! These functions extract structured judgments from free-form evaluator
//! responses. They are pure domain logic with no I/O.
//!
//! Evaluators are asked to answer in this shape:
//!
//! ```text
//! Verdict: Faithful | Mutated | Unclear
//! Confidence: Low | Medium | High
//! Key Arguments:
//! - bullet point
//! ```
//!
//! # Functions
//!
//! | Function | Returns | On malformed input |
//! |----------|---------|--------------------|
//! | [`parse_verdict`] | raw verdict label | `"Unclear"` |
//! | [`parse_judgment`] | [`ParsedJudgment`] | `Verdict::Unclear` + [`ParseAnomaly`] entries |
//!
//! Neither function can fail.

use super::verdict::{Confidence, Verdict};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const VERDICT_LABEL: &str = "verdict";
const CONFIDENCE_LABEL: &str = "confidence";
const KEY_ARGUMENTS_LABEL: &str = "key arguments";

/// A deviation from the requested response shape.
///
/// Anomalies never fail a case; they are recorded on the judgment so the
/// degradation stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum ParseAnomaly {
    #[error("no verdict line found")]
    MissingVerdict,

    #[error("unrecognized verdict: {0}")]
    UnrecognizedVerdict(String),

    #[error("no confidence line found")]
    MissingConfidence,

    #[error("unrecognized confidence: {0}")]
    UnrecognizedConfidence(String),

    #[error("no key arguments found")]
    MissingKeyArguments,
}

/// Structured view of one evaluator response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedJudgment {
    pub verdict: Verdict,
    pub confidence: Option<Confidence>,
    pub key_arguments: Vec<String>,
    pub anomalies: Vec<ParseAnomaly>,
}

impl ParsedJudgment {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Split `Label: value` into a normalized label and the raw value.
///
/// The label tolerates markdown decoration (`**Verdict:**`, `- Verdict:`,
/// `### Verdict:`). Lines without a colon have no label.
fn split_label(line: &str) -> Option<(String, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = label
        .trim()
        .trim_start_matches(['-', '#', '>'])
        .trim()
        .trim_matches(['*', '_', '`'])
        .trim()
        .to_lowercase();
    Some((label, value))
}

fn value_for<'a>(text: &'a str, wanted: &str) -> Option<&'a str> {
    text.lines().find_map(|line| match split_label(line) {
        Some((label, value)) if label == wanted => Some(value.trim()),
        _ => None,
    })
}

/// Extract the verdict label from an evaluator response.
///
/// Returns the text after the first colon of the first line labelled
/// `verdict` (case-insensitive), trimmed. Returns `"Unclear"` when no such
/// line exists.
///
/// # Examples
///
/// ```
/// use jury_domain::parse_verdict;
///
/// assert_eq!(parse_verdict("Verdict: Mutated\nConfidence: High"), "Mutated");
/// assert_eq!(parse_verdict("Confidence: Low\nKey Arguments:\n- none"), "Unclear");
/// ```
pub fn parse_verdict(response: &str) -> String {
    value_for(response, VERDICT_LABEL)
        .map(str::to_string)
        .unwrap_or_else(|| Verdict::Unclear.as_str().to_string())
}

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    for marker in ["- ", "* ", "• ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }

    // Numbered bullets: "1." / "2)"
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim());
        }
    }
    None
}

fn key_arguments(response: &str) -> Vec<String> {
    let mut arguments: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in response.lines() {
        if !in_section {
            if let Some((label, value)) = split_label(line)
                && label == KEY_ARGUMENTS_LABEL
            {
                in_section = true;
                let inline = value.trim().trim_matches(['*', '_']).trim();
                if !inline.is_empty() {
                    arguments.push(inline.to_string());
                }
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(bullet) = strip_bullet(line) {
            if !bullet.is_empty() {
                arguments.push(bullet.to_string());
            }
            continue;
        }

        // Another field ends the section
        if let Some((label, _)) = split_label(line)
            && (label == VERDICT_LABEL || label == CONFIDENCE_LABEL)
        {
            break;
        }

        // Wrapped continuation of the previous bullet
        match arguments.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(trimmed);
            }
            None => arguments.push(trimmed.to_string()),
        }
    }

    arguments
}

/// Parse a full evaluator response into verdict, confidence and arguments.
///
/// Total: every deviation from the requested shape becomes a
/// [`ParseAnomaly`] and the verdict falls back to `Unclear`.
///
/// # Examples
///
/// ```
/// use jury_domain::{parse_judgment, Confidence, Verdict};
///
/// let parsed = parse_judgment("Verdict: Faithful\nConfidence: High\nKey Arguments:\n- numbers match");
/// assert_eq!(parsed.verdict, Verdict::Faithful);
/// assert_eq!(parsed.confidence, Some(Confidence::High));
/// assert_eq!(parsed.key_arguments, vec!["numbers match"]);
/// assert!(parsed.is_clean());
/// ```
pub fn parse_judgment(response: &str) -> ParsedJudgment {
    let mut anomalies = Vec::new();

    let verdict = match value_for(response, VERDICT_LABEL) {
        None => {
            anomalies.push(ParseAnomaly::MissingVerdict);
            Verdict::Unclear
        }
        Some(label) => Verdict::from_label(label).unwrap_or_else(|| {
            anomalies.push(ParseAnomaly::UnrecognizedVerdict(label.to_string()));
            Verdict::Unclear
        }),
    };

    let confidence = match value_for(response, CONFIDENCE_LABEL) {
        None => {
            anomalies.push(ParseAnomaly::MissingConfidence);
            None
        }
        Some(label) => {
            let confidence = Confidence::from_label(label);
            if confidence.is_none() {
                anomalies.push(ParseAnomaly::UnrecognizedConfidence(label.to_string()));
            }
            confidence
        }
    };

    let key_arguments = key_arguments(response);
    if key_arguments.is_empty() {
        anomalies.push(ParseAnomaly::MissingKeyArguments);
    }

    ParsedJudgment {
        verdict,
        confidence,
        key_arguments,
        anomalies,
    }
}
