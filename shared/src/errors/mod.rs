//! Shared error codes and error detail structure

use serde::{Deserialize, Serialize};

/// A single error entry inside a `BaseResponse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code for client identification
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorDetail {
    /// Create a new error detail
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error codes used across the application
///
/// One code per condition; handlers and tests match on these values.
pub mod error_codes {
    pub const CONFIG_MISSING: &str = "CONFIG_MISSING";
    pub const REFRESH_TOKEN_NOT_FOUND: &str = "REFRESH_TOKEN_NOT_FOUND";
    pub const REFRESH_TOKEN_EXPIRED: &str = "REFRESH_TOKEN_EXPIRED";
    pub const INVALID_REFRESH_TOKEN: &str = "INVALID_REFRESH_TOKEN";
    pub const TOKEN_REUSE_DETECTED: &str = "TOKEN_REUSE_DETECTED";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_NOT_YET_VALID: &str = "TOKEN_NOT_YET_VALID";
    pub const INVALID_SIGNATURE: &str = "INVALID_SIGNATURE";
    pub const INVALID_TOKEN_FORMAT: &str = "INVALID_TOKEN_FORMAT";
    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";
    pub const CLAIM_MISSING: &str = "CLAIM_MISSING";
    pub const CLAIM_MALFORMED: &str = "CLAIM_MALFORMED";
    pub const USER_UNAUTHORIZED_OPERATION: &str = "USER_UNAUTHORIZED_OPERATION";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const USER_EMAIL_ALREADY_EXISTS: &str = "USER_EMAIL_ALREADY_EXISTS";
    pub const WRONG_EMAIL_OR_PASSWORD: &str = "WRONG_EMAIL_OR_PASSWORD";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONCURRENCY_CONFLICT: &str = "CONCURRENCY_CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
