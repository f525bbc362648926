use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_shared::BaseResponse;

use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::cookies::{access_token_cookie, presented_refresh_token, refresh_token_cookie};
use crate::handlers::error::{handle_domain_error, handle_validation_errors, missing_field};

use super::{client_ip, AppState};

/// Handler for POST /user/refresh
///
/// Rotates the presented refresh token, taken from the body or else the
/// refresh cookie. The old token stops working immediately; presenting it
/// again revokes the whole chain and fails with `TOKEN_REUSE_DETECTED`.
///
/// # Errors
/// - `VALIDATION_ERROR`: no token in the body or the cookie
/// - `REFRESH_TOKEN_NOT_FOUND`: token was never issued
/// - `REFRESH_TOKEN_EXPIRED`: token is past its expiry
/// - `TOKEN_REUSE_DETECTED`: token was already rotated or revoked
pub async fn refresh<U, R>(
    req: HttpRequest,
    state: web::Data<AppState<U, R>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let Some(refresh_token) = presented_refresh_token(&req, &state.cookies, request.refresh_token)
    else {
        return missing_field("refresh_token");
    };

    let ip = client_ip(&req, state.trust_forwarded_headers);

    match state.auth_service.refresh(&refresh_token, &ip).await {
        Ok(token_pair) => HttpResponse::Ok()
            .cookie(access_token_cookie(
                &state.cookies,
                &token_pair.access_token,
                token_pair.access_expires_in,
            ))
            .cookie(refresh_token_cookie(
                &state.cookies,
                &token_pair.refresh_token,
                token_pair.refresh_expires_in,
            ))
            .json(BaseResponse::success(token_pair)),
        Err(error) => handle_domain_error(error),
    }
}
