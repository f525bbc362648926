//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, ConfigError, TokenError};

use sb_shared::{error_codes, ErrorDetail};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A conditional write lost against a concurrent writer
    #[error("Concurrency conflict on {resource}")]
    ConcurrencyConflict { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomainError {
    /// Stable error code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::ConcurrencyConflict { .. } => error_codes::CONCURRENCY_CONFLICT,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
            DomainError::Config(e) => e.error_code(),
        }
    }

    /// True for errors operators must treat as a security incident
    pub fn is_security_event(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::TokenReuseDetected))
    }

    pub fn to_error_detail(&self) -> ErrorDetail {
        ErrorDetail::new(self.error_code(), self.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
