//! Vote-count rules used by the aggregator
//!
//! A rule answers "do `votes` out of a panel of `total` reach the bar?".
//! Rules are relative to panel size, so a roster of any size gets a
//! meaningful threshold.

use serde::{Deserialize, Serialize};

/// Threshold rule over a panel of voters
///
/// - `Majority`: more than half of the panel (default)
/// - `Unanimous`: the whole panel
/// - `AtLeast(n)`: at least n voters
/// - `Percentage(p)`: at least p% of the panel
///
/// # Example
///
/// ```
/// use jury_domain::VoteRule;
///
/// let rule = VoteRule::Majority;
/// assert!(rule.is_satisfied(2, 3));  // 2/3 > 50%
/// assert!(!rule.is_satisfied(1, 3)); // 1/3 < 50%
///
/// let strict = VoteRule::Unanimous;
/// assert!(strict.is_satisfied(3, 3));
/// assert!(!strict.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoteRule {
    /// More than half must agree (n/2 + 1)
    #[default]
    Majority,

    /// Every voter must agree
    Unanimous,

    /// At least n voters must agree
    AtLeast(usize),

    /// At least this percentage must agree (0-100)
    Percentage(u8),
}

impl VoteRule {
    /// Check if `votes` out of `total` satisfy the rule
    pub fn is_satisfied(&self, votes: usize, total: usize) -> bool {
        total > 0 && votes >= self.min_votes_needed(total)
    }

    /// Get the minimum votes needed for this rule given a panel size.
    ///
    /// Never below one: a rule cannot be met without a single vote.
    pub fn min_votes_needed(&self, total: usize) -> usize {
        let needed = match self {
            VoteRule::Majority => total / 2 + 1,
            VoteRule::Unanimous => total,
            VoteRule::AtLeast(n) => *n,
            VoteRule::Percentage(p) => Self::percentage_threshold(*p, total),
        };
        needed.max(1)
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            VoteRule::Majority => "majority (more than half)".to_string(),
            VoteRule::Unanimous => "unanimous (every voter)".to_string(),
            VoteRule::AtLeast(n) => format!("at least {} votes", n),
            VoteRule::Percentage(p) => format!("at least {}% of votes", p),
        }
    }

    fn percentage_threshold(p: u8, total: usize) -> usize {
        (total as f64 * (p as f64 / 100.0)).ceil() as usize
    }
}

impl std::fmt::Display for VoteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for VoteRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(VoteRule::Majority),
            "unanimous" => Ok(VoteRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after atleast:")?
                    .parse()
                    .map_err(|_| "Invalid number for atleast")?;
                if n == 0 {
                    return Err("atleast:0 would be met without any vote".to_string());
                }
                Ok(VoteRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str.parse().map_err(|_| "Invalid percentage")?;
                if p == 0 || p > 100 {
                    return Err(format!("Percentage out of range (1-100): {}", p));
                }
                Ok(VoteRule::Percentage(p))
            }
            _ => Err(format!(
                "Unknown vote rule: {}. Valid: majority, unanimous, atleast:N, percentage:N or N%",
                s
            )),
        }
    }
}
