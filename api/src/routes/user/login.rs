use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_shared::BaseResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::cookies::{access_token_cookie, refresh_token_cookie};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::{client_ip, AppState};

/// Handler for POST /user/login
///
/// # Request Body
///
/// ```json
/// { "email": "test@gmail.com", "password": "..." }
/// ```
///
/// # Response
///
/// `BaseResponse<AuthResponse>` with the access token, a new root refresh
/// token and both lifetimes in seconds. Both tokens are also set as HttpOnly
/// cookies. Wrong credentials are a 400 with `WRONG_EMAIL_OR_PASSWORD`
/// whether or not the email exists.
pub async fn login<U, R>(
    req: HttpRequest,
    state: web::Data<AppState<U, R>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let ip = client_ip(&req, state.trust_forwarded_headers);

    match state
        .auth_service
        .login(&request.email, &request.password, &ip)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok()
            .cookie(access_token_cookie(
                &state.cookies,
                &auth_response.access_token,
                auth_response.expires_in,
            ))
            .cookie(refresh_token_cookie(
                &state.cookies,
                &auth_response.refresh_token,
                auth_response.refresh_expires_in,
            ))
            .json(BaseResponse::success(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
