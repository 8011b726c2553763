//! Dataset configuration from TOML (`[dataset]` section)

use jury_domain::CaseSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw dataset configuration from TOML
///
/// # Example
///
/// ```toml
/// [dataset]
/// path = "Pioneer.csv"
/// internal_column = "truth"
/// external_column = "claim"
/// rows = [3, 7, 10, 12, 14]   # positions after blank rows are dropped
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatasetConfig {
    pub path: PathBuf,
    /// Column holding the internal fact
    pub internal_column: String,
    /// Column holding the external claim
    pub external_column: String,
    /// Explicit positions to evaluate (takes precedence over `limit`)
    pub rows: Option<Vec<usize>>,
    /// Evaluate only the first N usable rows
    pub limit: Option<usize>,
}

impl Default for FileDatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Pioneer.csv"),
            internal_column: "truth".to_string(),
            external_column: "claim".to_string(),
            rows: None,
            limit: None,
        }
    }
}

impl FileDatasetConfig {
    pub fn selection(&self) -> CaseSelection {
        match (&self.rows, self.limit) {
            (Some(rows), _) => CaseSelection::Positions(rows.clone()),
            (None, Some(limit)) => CaseSelection::First(limit),
            (None, None) => CaseSelection::All,
        }
    }
}
