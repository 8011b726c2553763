//! Case selection policy
//!
//! Chooses which dataset rows become cases. Positions refer to rows that
//! survived filtering (rows with a missing fact or claim are dropped first).

use serde::{Deserialize, Serialize};

/// Which filtered rows to evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseSelection {
    /// Every usable row
    #[default]
    All,
    /// The first n usable rows
    First(usize),
    /// Explicit positions among the usable rows, in the given order
    Positions(Vec<usize>),
}

impl CaseSelection {
    /// Resolve the selection against `available` usable rows.
    ///
    /// Returns the chosen positions, or the first out-of-range position.
    pub fn resolve(&self, available: usize) -> Result<Vec<usize>, usize> {
        match self {
            CaseSelection::All => Ok((0..available).collect()),
            CaseSelection::First(n) => Ok((0..available.min(*n)).collect()),
            CaseSelection::Positions(positions) => {
                if let Some(&bad) = positions.iter().find(|&&p| p >= available) {
                    return Err(bad);
                }
                Ok(positions.clone())
            }
        }
    }
}
