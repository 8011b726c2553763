//! Use cases (application services)
//!
//! Use cases orchestrate domain logic and coordinate with external
//! services through ports.

pub mod judge_claim;
pub mod run_deliberation;
pub mod run_docket;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod testing;
