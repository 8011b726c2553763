//! Output formatter trait

use jury_application::CaseOutcome;
use jury_domain::DeliberationResult;

/// Trait for formatting deliberation results
pub trait OutputFormatter {
    /// Format the full transcript of one case
    fn format(&self, result: &DeliberationResult) -> String;

    /// Format one summary line for a case
    fn format_verdict(&self, result: &DeliberationResult) -> String;

    /// Format a whole docket as JSON
    fn format_json(&self, outcomes: &[CaseOutcome]) -> String;
}
