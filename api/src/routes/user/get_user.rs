use actix_web::{web, HttpResponse};

use sb_core::domain::entities::user::UserRole;
use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_core::services::AuthorizationGuard;
use sb_shared::BaseResponse;

use crate::dto::auth::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::Authenticated;

use super::AppState;

/// Handler for GET /user/{id}
///
/// Administrators only; anyone else gets a 403 with
/// `USER_UNAUTHORIZED_OPERATION`.
pub async fn get_user<U, R>(
    state: web::Data<AppState<U, R>>,
    Authenticated(auth): Authenticated,
    path: web::Path<i32>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    if let Err(error) = AuthorizationGuard::require_role(&auth, UserRole::Admin) {
        return handle_domain_error(error);
    }

    match state.auth_service.find_user(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(BaseResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(error),
    }
}
