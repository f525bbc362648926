//! User and session endpoints
//!
//! - `POST /user/register` creates an account
//! - `POST /user/login` exchanges credentials for a token pair
//! - `POST /user/refresh` rotates a refresh token
//! - `POST /user/revoke` revokes a refresh token (bearer required)
//! - `PUT /user/update` changes a user's name and email (owner or admin)
//! - `GET /user/{id}` loads a user (administrators only)
//!
//! Login and refresh also set the token cookies named in `CookieConfig`;
//! refresh and revoke accept the refresh token from either the body or
//! that cookie.

pub mod get_user;
pub mod login;
pub mod refresh;
pub mod register;
pub mod revoke;
pub mod update_user;

use std::sync::Arc;

use actix_web::HttpRequest;

use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_core::services::{AccessTokenIssuer, AuthService};
use sb_shared::CookieConfig;

pub use get_user::get_user;
pub use login::login;
pub use refresh::refresh;
pub use register::register;
pub use revoke::revoke;
pub use update_user::update_user;

/// Application state shared by the user endpoints
pub struct AppState<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub auth_service: Arc<AuthService<U, R>>,
    /// Verifies bearer tokens in `JwtAuth`
    pub issuer: Arc<AccessTokenIssuer>,
    /// Token cookie names and attributes
    pub cookies: CookieConfig,
    /// Read the client address from forwarding headers
    pub trust_forwarded_headers: bool,
}

/// Caller address recorded on refresh token records
///
/// The socket peer unless `trust_forwarded` is set, in which case the
/// `Forwarded`/`X-Forwarded-For` value wins.
pub(crate) fn client_ip(req: &HttpRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(ip) = req.connection_info().realip_remote_addr() {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
