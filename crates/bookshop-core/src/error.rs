//! Error types shared by the business services and the repositories.

use thiserror::Error;
use uuid::Uuid;

/// Failures of the catalog, order and user services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("{0}")]
    Validation(String),

    #[error("already exists: {0}")]
    Duplicate(String),

    #[error("not allowed")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Persistence failures, independent of the backing store.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage unreachable: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("record not found")]
    NotFound,

    #[error("constraint violated: {0}")]
    Constraint(String),
}

/// Unique-key violations surface as duplicates; every other storage
/// failure is internal.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_conversion() {
        let dup: DomainError = RepoError::Constraint("email".into()).into();
        assert!(matches!(dup, DomainError::Duplicate(ref m) if m == "email"));

        let down: DomainError = RepoError::Connection("refused".into()).into();
        assert!(matches!(down, DomainError::Internal(ref m) if m.contains("refused")));
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let id = Uuid::nil();
        let err = DomainError::NotFound {
            entity_type: "book",
            id,
        };
        assert_eq!(err.to_string(), format!("book {id} not found"));
    }
}
