//! Case entity

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a case: the row index it was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub usize);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An internal fact paired with the external claim under evaluation (Entity)
///
/// Immutable once built. Both texts are guaranteed non-blank.
///
/// # Example
///
/// ```
/// use jury_domain::Case;
///
/// let case = Case::try_new(3, "A 2020 survey of 500 adults found X", "X is universally true").unwrap();
/// assert_eq!(case.id().0, 3);
/// assert!(Case::try_new(4, "fact", "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    id: CaseId,
    internal_fact: String,
    external_claim: String,
}

impl Case {
    /// Build a case, rejecting blank fact or claim text
    pub fn try_new(
        id: usize,
        internal_fact: impl Into<String>,
        external_claim: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let internal_fact = internal_fact.into();
        let external_claim = external_claim.into();

        if internal_fact.trim().is_empty() {
            return Err(DomainError::InvalidCase {
                id,
                reason: "internal fact is empty".to_string(),
            });
        }
        if external_claim.trim().is_empty() {
            return Err(DomainError::InvalidCase {
                id,
                reason: "external claim is empty".to_string(),
            });
        }

        Ok(Self {
            id: CaseId(id),
            internal_fact,
            external_claim,
        })
    }

    pub fn id(&self) -> CaseId {
        self.id
    }

    pub fn internal_fact(&self) -> &str {
        &self.internal_fact
    }

    pub fn external_claim(&self) -> &str {
        &self.external_claim
    }
}
