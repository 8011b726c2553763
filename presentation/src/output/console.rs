//! Console output formatter for deliberation results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use jury_application::CaseOutcome;
use jury_domain::{Decision, DeliberationResult, Judgment, Verdict};
use serde_json::{Value, json};

const RULE_WIDTH: usize = 80;

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete transcript of one case
    pub fn format(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("CASE {}", result.case_id)));
        output.push('\n');

        output.push_str(&format!("\n{}\n", "INTERNAL FACT:".cyan().bold()));
        output.push_str(&Self::indent(&result.internal_fact, 2));
        output.push_str(&format!("\n\n{}\n", "EXTERNAL CLAIM:".cyan().bold()));
        output.push_str(&Self::indent(&result.external_claim, 2));
        output.push('\n');

        output.push_str(&Self::section_header("ROUND 1: INITIAL JUDGMENTS"));
        for judgment in &result.round1 {
            output.push_str(&Self::judgment_block(judgment, judgment.role_name()));
        }

        output.push_str(&Self::section_header("ROUND 2: CONFRONTATION"));
        for judgment in &result.round2 {
            let label = format!("{} – After Confrontation", judgment.role_name());
            output.push_str(&Self::judgment_block(judgment, &label));
        }

        output.push_str(&Self::section_header("FINAL VERDICT"));
        output.push_str(&format!(
            "{} {}\n",
            "Decision:".bold(),
            Self::paint_decision(result.final_decision)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Agent votes:".bold(),
            Self::vote_list(&result.round2_votes())
        ));

        let changed = result.changed_minds();
        if !changed.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Changed after confrontation:".dimmed(),
                changed.join(", ")
            ));
        }

        let anomalies = result.anomaly_count();
        if anomalies > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} response(s) deviated from the answer format", anomalies).yellow()
            ));
        }

        output
    }

    /// One summary line: `Case N: Decision [votes]`
    pub fn format_verdict(result: &DeliberationResult) -> String {
        format!(
            "Case {}: {} {}",
            result.case_id,
            Self::paint_decision(result.final_decision),
            Self::vote_list(&result.round2_votes())
        )
    }

    /// Summary line for any outcome; failed cases show their error
    pub fn format_outcome(outcome: &CaseOutcome) -> String {
        match &outcome.result {
            Ok(result) => Self::format_verdict(result),
            Err(e) => format!("Case {}: {} {}", outcome.case_id, "FAILED".red().bold(), e),
        }
    }

    /// Format a whole docket as a pretty JSON array in case order.
    ///
    /// Failed cases appear as `{"case_id": N, "error": "..."}`.
    pub fn format_json(outcomes: &[CaseOutcome]) -> String {
        let entries: Vec<Value> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(result) => serde_json::to_value(result).unwrap_or(Value::Null),
                Err(e) => json!({
                    "case_id": outcome.case_id,
                    "error": e.to_string(),
                }),
            })
            .collect();

        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Tally line printed after the last case
    pub fn summary(outcomes: &[CaseOutcome]) -> String {
        let mut mutated = 0;
        let mut faithful = 0;
        let mut ambiguous = 0;
        let mut failed = 0;

        for outcome in outcomes {
            match &outcome.result {
                Ok(result) => match result.final_decision {
                    Decision::Mutated => mutated += 1,
                    Decision::Faithful => faithful += 1,
                    Decision::Ambiguous => ambiguous += 1,
                },
                Err(_) => failed += 1,
            }
        }

        let mut line = format!(
            "{} cases: {} Mutated, {} Faithful, {} Ambiguous",
            outcomes.len(),
            mutated,
            faithful,
            ambiguous
        );
        if failed > 0 {
            line.push_str(&format!(", {}", format!("{} failed", failed).red()));
        }
        line
    }

    fn judgment_block(judgment: &Judgment, label: &str) -> String {
        let mut block = format!(
            "\n{}\n{}\n",
            format!("[{}]", label).yellow().bold(),
            Self::indent(judgment.raw_text(), 2)
        );
        for anomaly in judgment.anomalies() {
            block.push_str(&format!("  {}\n", format!("(note: {})", anomaly).dimmed()));
        }
        block
    }

    fn vote_list(votes: &[Verdict]) -> String {
        let names: Vec<&str> = votes.iter().map(Verdict::as_str).collect();
        format!("[{}]", names.join(", "))
    }

    fn paint_decision(decision: Decision) -> ColoredString {
        match decision {
            Decision::Mutated => decision.as_str().red().bold(),
            Decision::Faithful => decision.as_str().green().bold(),
            Decision::Ambiguous => decision.as_str().yellow().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(RULE_WIDTH);
        format!("{}\n{}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("--- {} ---", title).cyan().bold())
    }

    /// Indent every line of `text` by `width` spaces
    pub fn indent(text: &str, width: usize) -> String {
        let pad = " ".repeat(width);
        text.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", pad, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DeliberationResult) -> String {
        Self::format(result)
    }

    fn format_verdict(&self, result: &DeliberationResult) -> String {
        Self::format_verdict(result)
    }

    fn format_json(&self, outcomes: &[CaseOutcome]) -> String {
        Self::format_json(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jury_application::DeliberationError;
    use jury_domain::{Aggregator, Case, CaseId, Round};

    fn judgment(role: &str, round: Round, verdict: &str) -> Judgment {
        Judgment::from_response(
            role,
            round,
            format!(
                "Verdict: {}\nConfidence: High\nKey Arguments:\n- scope widened",
                verdict
            ),
        )
    }

    fn sample() -> DeliberationResult {
        let case = Case::try_new(
            7,
            "A 2020 survey of 500 adults found X",
            "X is universally true",
        )
        .unwrap();
        let round1 = vec![
            judgment("Pedantic Fact-Checker", Round::Initial, "Mutated"),
            judgment("Context Analyst", Round::Initial, "Faithful"),
        ];
        let round2 = vec![
            judgment("Pedantic Fact-Checker", Round::Confrontation, "Mutated"),
            judgment("Context Analyst", Round::Confrontation, "Mutated"),
        ];
        DeliberationResult::new(&case, round1, round2, &Aggregator::default())
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_full_layout() {
        plain();
        let text = ConsoleFormatter::format(&sample());

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("CASE 7"));
        assert!(text.contains("INTERNAL FACT:\n  A 2020 survey of 500 adults found X"));
        assert!(text.contains("EXTERNAL CLAIM:\n  X is universally true"));
        assert!(text.contains("[Context Analyst]\n  Verdict: Faithful"));
        assert!(text.contains("[Context Analyst – After Confrontation]\n  Verdict: Mutated"));
        assert!(text.contains("Decision: Mutated"));
        assert!(text.contains("Agent votes: [Mutated, Mutated]"));
        assert!(text.contains("Changed after confrontation: Context Analyst"));

        let round1 = text.find("--- ROUND 1: INITIAL JUDGMENTS ---").unwrap();
        let round2 = text.find("--- ROUND 2: CONFRONTATION ---").unwrap();
        let verdict = text.find("--- FINAL VERDICT ---").unwrap();
        assert!(round1 < round2 && round2 < verdict);
    }

    #[test]
    fn test_anomalies_are_noted() {
        plain();
        let case = Case::try_new(1, "fact", "claim").unwrap();
        let round1 = vec![Judgment::from_response("Solo", Round::Initial, "No idea.")];
        let round2 = vec![Judgment::from_response(
            "Solo",
            Round::Confrontation,
            "Still no idea.",
        )];
        let result = DeliberationResult::new(&case, round1, round2, &Aggregator::default());

        let text = ConsoleFormatter::format(&result);
        assert!(text.contains("(note: no verdict line found)"));
        assert!(text.contains("deviated from the answer format"));
        assert!(text.contains("Decision: Ambiguous"));
    }

    #[test]
    fn test_verdict_line() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_verdict(&sample()),
            "Case 7: Mutated [Mutated, Mutated]"
        );
    }

    #[test]
    fn test_docket_json_includes_failures() {
        let outcomes = vec![
            CaseOutcome {
                case_id: CaseId(7),
                result: Ok(sample()),
            },
            CaseOutcome {
                case_id: CaseId(9),
                result: Err(DeliberationError::Cancelled),
            },
        ];

        let value: Value = serde_json::from_str(&ConsoleFormatter::format_json(&outcomes)).unwrap();
        assert_eq!(value[0]["case_id"], 7);
        assert_eq!(value[0]["final_decision"], "Mutated");
        assert_eq!(value[0]["round1"][1]["verdict"], "Faithful");
        assert_eq!(value[1]["case_id"], 9);
        assert!(value[1]["error"].as_str().is_some());
    }

    #[test]
    fn test_summary_counts() {
        plain();
        let outcomes = vec![
            CaseOutcome {
                case_id: CaseId(7),
                result: Ok(sample()),
            },
            CaseOutcome {
                case_id: CaseId(9),
                result: Err(DeliberationError::Cancelled),
            },
        ];

        assert_eq!(
            ConsoleFormatter::summary(&outcomes),
            "2 cases: 1 Mutated, 0 Faithful, 0 Ambiguous, 1 failed"
        );
        assert_eq!(
            ConsoleFormatter::format_outcome(&outcomes[0]),
            "Case 7: Mutated [Mutated, Mutated]"
        );
        assert!(ConsoleFormatter::format_outcome(&outcomes[1]).starts_with("Case 9: FAILED"));
    }

    #[test]
    fn test_indent_keeps_blank_lines_empty() {
        assert_eq!(ConsoleFormatter::indent("a\n\nb", 2), "  a\n\n  b");
    }
}
