//! API response envelope

use serde::{Deserialize, Serialize};

use crate::errors::ErrorDetail;

/// Result envelope returned by every endpoint
///
/// `success` is true exactly when `errors` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseResponse<T = ()> {
    /// Whether the request was successful
    pub success: bool,

    /// Errors (empty on success)
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,

    /// Response payload (present on success when the operation returns data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl BaseResponse<()> {
    /// Successful response without a payload
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: None,
        }
    }
}

impl<T> BaseResponse<T> {
    /// Successful response carrying data
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Failed response with a single error
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_errors(vec![ErrorDetail::new(code, message)])
    }

    /// Failed response with several errors
    pub fn from_errors(errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            result: None,
        }
    }

    /// Code of the first error, if any
    pub fn first_error_code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }
}
