//! Jury deliberation domain
//!
//! This module contains the core concepts of claim-faithfulness deliberation.
//!
//! # Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Case (internal fact + external claim)                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Round 1   each role judges independently  → Judgment × N    │
//! │                          ↓                                   │
//! │  Confrontation transcript  (all round-1 outputs, in order)   │
//! │                          ↓                                   │
//! │  Round 2   each role re-judges with transcript → Judgment × N│
//! │                          ↓                                   │
//! │  Aggregator (round-2 verdicts only) → Decision               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod aggregation;
pub mod judgment;
pub mod parsing;
pub mod result;
pub mod role;
pub mod rule;
pub mod verdict;

// Re-export main types
pub use aggregation::Aggregator;
pub use judgment::{Judgment, Round};
pub use parsing::{ParseAnomaly, ParsedJudgment, parse_judgment, parse_verdict};
pub use result::DeliberationResult;
pub use role::{AgentRole, AgentRoster};
pub use rule::VoteRule;
pub use verdict::{Confidence, Decision, Verdict};
