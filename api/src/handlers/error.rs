//! Conversion of domain failures into `BaseResponse` HTTP responses.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use sb_core::errors::{AuthError, DomainError, TokenError};
use sb_shared::{error_codes, BaseResponse, ErrorDetail};

/// HTTP status for a domain error
///
/// Everything is a 400 except access token failures (401) and denied
/// operations (403).
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(AuthError::UserUnauthorizedOperation) => StatusCode::FORBIDDEN,
        DomainError::Token(
            TokenError::TokenExpired
            | TokenError::TokenNotYetValid
            | TokenError::InvalidSignature
            | TokenError::InvalidTokenFormat,
        ) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_security_event() {
        tracing::warn!(code = error.error_code(), "Request rejected as token replay");
    } else if matches!(error, DomainError::Internal { .. }) {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(code = error.error_code(), error = %error, "Request rejected");
    }

    let detail = match &error {
        DomainError::Internal { .. } => {
            ErrorDetail::new(error.error_code(), "An internal error occurred")
        }
        _ => error.to_error_detail(),
    };

    let body: BaseResponse = BaseResponse::from_errors(vec![detail]);
    HttpResponse::build(status_for(&error)).json(body)
}

/// 401 for a missing or unusable bearer token
pub fn unauthorized(message: &str) -> HttpResponse {
    let body: BaseResponse = BaseResponse::error(error_codes::UNAUTHORIZED, message);
    HttpResponse::Unauthorized().json(body)
}

/// 400 listing every invalid field of a request body
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().into_keys().collect();
    fields.sort_unstable();

    let details = fields
        .into_iter()
        .map(|field| ErrorDetail::new(error_codes::VALIDATION_ERROR, format!("Invalid field: {}", field)))
        .collect();

    let body: BaseResponse = BaseResponse::from_errors(details);
    HttpResponse::BadRequest().json(body)
}

/// 400 for a required field that was not supplied
pub fn missing_field(field: &str) -> HttpResponse {
    let body: BaseResponse =
        BaseResponse::error(error_codes::VALIDATION_ERROR, format!("Invalid field: {}", field));
    HttpResponse::BadRequest().json(body)
}

/// `JsonConfig` error handler producing the same envelope as other failures
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body: BaseResponse = BaseResponse::error(error_codes::VALIDATION_ERROR, error.to_string());
    InternalError::from_response(error, HttpResponse::BadRequest().json(body)).into()
}
