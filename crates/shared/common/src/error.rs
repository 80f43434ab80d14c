//! Unified error handling for the account services.
//!
//! Every failure the services surface is one of these kinds. Callers map a
//! kind to their transport once, via `code()`, never by message content.

use domain::DomainError;
use thiserror::Error;
use uuid::Uuid;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Account rules
    #[error("username is too long (>{max})")]
    UsernameTooLong { max: usize },

    #[error("username already exists")]
    UsernameTaken,

    #[error("Resource not found")]
    NotFound,

    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    // Input
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // Partial failures
    /// The account is gone but its userspace could not be torn down.
    #[error("account {user_id} deleted but userspace cleanup is incomplete: {reason}")]
    CleanupIncomplete { user_id: Uuid, reason: String },

    #[error("Userspace error: {0}")]
    Userspace(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UsernameTooLong { .. } => "USERNAME_TOO_LONG",
            AppError::UsernameTaken => "USERNAME_TAKEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            AppError::CleanupIncomplete { .. } => "CLEANUP_INCOMPLETE",
            AppError::Userspace(_) => "USERSPACE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "TOKEN_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::MalformedPayload(msg) => format!("Malformed payload: {}", msg),

            // Hide details for internal/security errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("Token error: {:?}", e);
                "A token error occurred".to_string()
            }
            AppError::CleanupIncomplete { user_id, reason } => {
                tracing::error!(%user_id, "Userspace cleanup incomplete: {}", reason);
                "Account deleted, storage cleanup is pending".to_string()
            }
            AppError::Userspace(msg) => {
                tracing::error!("Userspace error: {}", msg);
                "A storage error occurred".to_string()
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Service is misconfigured".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UsernameTooLong { max } => AppError::UsernameTooLong { max },
            DomainError::MalformedPayload(msg) => AppError::MalformedPayload(msg),
            DomainError::Password(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        AppError::MalformedPayload(msg.into())
    }

    pub fn userspace(msg: impl Into<String>) -> Self {
        AppError::Userspace(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
