//! Token cookies written alongside the JSON token responses.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use sb_shared::CookieConfig;

fn token_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name.to_string(), value.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie carrying the access token, living as long as the token
pub fn access_token_cookie(config: &CookieConfig, token: &str, expires_in: i64) -> Cookie<'static> {
    token_cookie(&config.access_token_name, token, expires_in, config.secure)
}

/// Cookie carrying the refresh token, living as long as the token
pub fn refresh_token_cookie(config: &CookieConfig, token: &str, expires_in: i64) -> Cookie<'static> {
    token_cookie(&config.refresh_token_name, token, expires_in, config.secure)
}

/// Expired, empty cookie that makes the browser drop `name`
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name.to_string(), "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Refresh token from the request body, or from the refresh cookie when the body has none
pub fn presented_refresh_token(
    req: &HttpRequest,
    config: &CookieConfig,
    from_body: Option<String>,
) -> Option<String> {
    from_body.filter(|token| !token.is_empty()).or_else(|| {
        req.cookie(&config.refresh_token_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}
