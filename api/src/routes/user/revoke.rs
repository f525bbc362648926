use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_shared::BaseResponse;

use crate::dto::auth::RevokeTokenRequest;
use crate::handlers::cookies::{presented_refresh_token, removal_cookie};
use crate::handlers::error::{handle_domain_error, handle_validation_errors, missing_field};
use crate::middleware::Authenticated;

use super::{client_ip, AppState};

/// Handler for POST /user/revoke
///
/// Requires an access token (bearer header or access cookie). The refresh
/// token comes from the body or else the refresh cookie. Revoking a token
/// that is not active fails with `INVALID_REFRESH_TOKEN` and leaves it
/// untouched. Success clears both token cookies.
pub async fn revoke<U, R>(
    req: HttpRequest,
    state: web::Data<AppState<U, R>>,
    Authenticated(auth): Authenticated,
    request: Option<web::Json<RevokeTokenRequest>>,
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

    match state.auth_service.revoke(&refresh_token, &ip).await {
        Ok(()) => {
            tracing::debug!(subject = auth.subject.as_deref(), ip = %ip, "Refresh token revoked on request");
            HttpResponse::Ok()
                .cookie(removal_cookie(&state.cookies.access_token_name))
                .cookie(removal_cookie(&state.cookies.refresh_token_name))
                .json(BaseResponse::ok())
        }
        Err(error) => handle_domain_error(error),
    }
}
