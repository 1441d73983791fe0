//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage collaborator errors.
///
/// Every repository call either succeeds or reports one of these; the caller
/// decides how to surface it. No variant implies a partial write.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The request could not be completed (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The storage collaborator answered with a non-success status.
    #[error("Request rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Entity not found")]
    NotFound,

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// The response body could not be understood.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RepoError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RepoError::Network(_) => true,
            RepoError::Rejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(RepoError::Network("reset".into()).is_transient());
        assert!(
            RepoError::Rejected {
                status: 503,
                detail: String::new()
            }
            .is_transient()
        );
        assert!(
            RepoError::Rejected {
                status: 429,
                detail: String::new()
            }
            .is_transient()
        );
        assert!(
            !RepoError::Rejected {
                status: 400,
                detail: String::new()
            }
            .is_transient()
        );
        assert!(!RepoError::NotFound.is_transient());
    }
}
