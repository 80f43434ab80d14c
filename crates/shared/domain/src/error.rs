//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (storage, filesystem, transport).

use thiserror::Error;

use crate::constants::MAX_USERNAME_LEN;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username exceeds `MAX_USERNAME_LEN`
    #[error("username is too long (>{max})")]
    UsernameTooLong { max: usize },

    /// Payload is not valid structured data
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Password hashing failed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Create a username length error using the shared bound
    pub fn username_too_long() -> Self {
        DomainError::UsernameTooLong {
            max: MAX_USERNAME_LEN,
        }
    }

    /// Create a malformed payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        DomainError::MalformedPayload(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
