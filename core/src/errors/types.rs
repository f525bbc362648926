//! Error type definitions for token lifecycle, authorization and configuration
//!
//! Each variant maps to exactly one stable code from `sb_shared::error_codes`.

use sb_shared::error_codes;
use thiserror::Error;

/// Refresh and access token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token expired")]
    Expired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// A consumed refresh token was presented again; the chain has been revoked
    #[error("Refresh token reuse detected")]
    TokenReuseDetected,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::NotFound => error_codes::REFRESH_TOKEN_NOT_FOUND,
            TokenError::Expired => error_codes::REFRESH_TOKEN_EXPIRED,
            TokenError::InvalidRefreshToken => error_codes::INVALID_REFRESH_TOKEN,
            TokenError::TokenReuseDetected => error_codes::TOKEN_REUSE_DETECTED,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::TokenNotYetValid => error_codes::TOKEN_NOT_YET_VALID,
            TokenError::InvalidSignature => error_codes::INVALID_SIGNATURE,
            TokenError::InvalidTokenFormat => error_codes::INVALID_TOKEN_FORMAT,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing claim: {claim}")]
    ClaimMissing { claim: String },

    #[error("Malformed claim: {claim}")]
    ClaimMalformed { claim: String },

    #[error("User is not authorized to perform this operation")]
    UserUnauthorizedOperation,

    #[error("User not found")]
    UserNotFound,

    #[error("Email is already used by another account")]
    UserEmailAlreadyExists,

    #[error("Wrong email or password")]
    WrongEmailOrPassword,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::ClaimMissing { .. } => error_codes::CLAIM_MISSING,
            AuthError::ClaimMalformed { .. } => error_codes::CLAIM_MALFORMED,
            AuthError::UserUnauthorizedOperation => error_codes::USER_UNAUTHORIZED_OPERATION,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::UserEmailAlreadyExists => error_codes::USER_EMAIL_ALREADY_EXISTS,
            AuthError::WrongEmailOrPassword => error_codes::WRONG_EMAIL_OR_PASSWORD,
        }
    }
}

/// Configuration errors
///
/// Only raised while constructing services at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {key}")]
    ConfigMissing { key: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        ConfigError::ConfigMissing { key: key.into() }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigMissing { .. } => error_codes::CONFIG_MISSING,
        }
    }
}
