//! Domain-specific error types and error handling.

mod types;

pub use types::{CredentialError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// True when the error should be reported to clients as an
    /// authorization failure rather than a server fault
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, DomainError::Credential(CredentialError::NotFoundOrExpired))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
