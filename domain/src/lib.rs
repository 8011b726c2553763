//! Domain layer for claim-jury
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Jury
//!
//! A jury is a fixed, ordered panel of evaluator roles. Each role judges
//! whether an external claim faithfully represents an internal fact:
//!
//! - **Round 1**: every role judges independently
//! - **Round 2 (Confrontation)**: every role sees all round-1 reasoning and re-judges
//! - **Decision**: round-2 verdicts collapse into `Faithful`, `Mutated` or `Ambiguous`
//!
//! ## Verdict parsing
//!
//! Evaluators answer in free-form text. Parsing is total: a response without a
//! recognizable verdict line becomes `Unclear`, never an error.

pub mod config;
pub mod core;
pub mod jury;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    case::{Case, CaseId},
    error::DomainError,
    model::Model,
    selection::CaseSelection,
};
pub use jury::{
    aggregation::Aggregator,
    judgment::{Judgment, Round},
    parsing::{ParseAnomaly, ParsedJudgment, parse_judgment, parse_verdict},
    result::DeliberationResult,
    role::{AgentRole, AgentRoster},
    rule::VoteRule,
    verdict::{Confidence, Decision, Verdict},
};
pub use prompt::PromptTemplate;
