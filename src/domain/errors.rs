//! Domain errors for the transparency engine.
//!
//! Missing purchase orders and detected cycles are *not* errors: the engine
//! degrades gracefully and reports them inside the result. Errors are reserved
//! for collaborator failures and invalid input at the boundary.

use thiserror::Error;

/// Domain-level errors that can occur while computing transparency.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Purchase order provider failed: {0}")]
    ProviderFailure(String),

    #[error("Score cache failed: {0}")]
    CacheFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
