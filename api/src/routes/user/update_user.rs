use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_shared::BaseResponse;

use crate::dto::auth::{UpdateUserRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::Authenticated;

use super::AppState;

/// Handler for PUT /user/update
///
/// The caller must be the target user or an administrator; anyone else gets
/// a 403 with `USER_UNAUTHORIZED_OPERATION`.
pub async fn update_user<U, R>(
    state: web::Data<AppState<U, R>>,
    Authenticated(auth): Authenticated,
    request: web::Json<UpdateUserRequest>,
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
        .update_user(&auth, request.user_id, &request.username, &request.email)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(BaseResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(error),
    }
}
