//! Core domain concepts shared across all subdomains.
//!
//! - [`case::Case`]: an internal fact paired with the external claim derived from it
//! - [`selection::CaseSelection`]: which dataset rows become cases
//! - [`model::Model`]: the reasoning model identifier
//! - [`error::DomainError`]: domain-level errors

pub mod case;
pub mod error;
pub mod model;
pub mod selection;
