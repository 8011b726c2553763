//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Jury roster has no evaluator roles")]
    EmptyRoster,

    #[error("Duplicate evaluator role name: {0}")]
    DuplicateRole(String),

    #[error("Evaluator role name cannot be empty")]
    EmptyRoleName,

    #[error("Invalid case {id}: {reason}")]
    InvalidCase { id: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_role_display() {
        let error = DomainError::DuplicateRole("Context Guardian".to_string());
        assert_eq!(
            error.to_string(),
            "Duplicate evaluator role name: Context Guardian"
        );
    }

    #[test]
    fn test_invalid_case_display() {
        let error = DomainError::InvalidCase {
            id: 4,
            reason: "external claim is blank".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid case 4: external claim is blank");
    }
}
