use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_shared::BaseResponse;

use crate::dto::auth::{RegisterRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /user/register
///
/// Creates an account with the `User` role and answers 201 with the new
/// user. An email held by a live account fails with
/// `USER_EMAIL_ALREADY_EXISTS`.
pub async fn register<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(BaseResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(error),
    }
}
