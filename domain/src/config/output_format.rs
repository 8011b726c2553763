//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for deliberation reports
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript: both rounds for every role plus the decision (default)
    #[default]
    Full,
    /// One line per case with the decision and vote list
    Verdict,
    /// JSON output
    Json,
}
