// src/error.rs
use thiserror::Error;

/// Errors returned by the person repository and its connection helpers.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to connect to MongoDB: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("validation failed for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("'{id}' is not a valid ObjectId")]
    InvalidId { id: String },

    #[error("person with id {id} not found")]
    NotFound { id: String },

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RepositoryError::Validation { .. })
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = RepositoryError::InvalidId { id: "nope".into() };
        assert_eq!(err.to_string(), "'nope' is not a valid ObjectId");

        let err = RepositoryError::Validation {
            field: "name",
            reason: "is required".into(),
        };
        assert_eq!(err.to_string(), "validation failed for 'name': is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }
}
