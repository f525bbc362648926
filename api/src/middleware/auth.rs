//! Bearer token authentication middleware.
//!
//! Extracts the access token from the `Authorization` header (or, when one is
//! configured, the access token cookie), verifies it with the shared
//! `AccessTokenIssuer`, and injects the resulting `AuthContext` into
//! the request extensions. Handlers read it back through the `Authenticated`
//! extractor.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;

use sb_core::domain::value_objects::AuthContext;
use sb_core::services::AccessTokenIssuer;

use crate::handlers::error::{handle_domain_error, unauthorized};

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    issuer: Arc<AccessTokenIssuer>,
    cookie_name: Option<Arc<str>>,
}

impl JwtAuth {
    /// Creates the middleware around the issuer that signed the tokens
    pub fn new(issuer: Arc<AccessTokenIssuer>) -> Self {
        Self {
            issuer,
            cookie_name: None,
        }
    }

    /// Accept the access token from cookie `name` when no bearer header is sent
    pub fn with_cookie(mut self, name: &str) -> Self {
        self.cookie_name = Some(Arc::from(name));
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            issuer: Arc::clone(&self.issuer),
            cookie_name: self.cookie_name.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    issuer: Arc<AccessTokenIssuer>,
    cookie_name: Option<Arc<str>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let issuer = Arc::clone(&self.issuer);
        let cookie_name = self.cookie_name.clone();

        Box::pin(async move {
            let token = extract_bearer_token(&req)
                .or_else(|| extract_cookie_token(&req, cookie_name.as_deref()?));

            let token = match token {
                Some(token) => token,
                None => {
                    let response = unauthorized("Missing or invalid Authorization header");
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match issuer.verify_access_token(&token) {
                Ok(claims) => claims,
                Err(error) => {
                    return Ok(req.into_response(handle_domain_error(error)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext::from_claims(&claims));

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the token from `Authorization: Bearer <token>`
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn extract_cookie_token(req: &ServiceRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// The principal injected by `JwtAuth`
///
/// Fails with 401 when the route is not wrapped by the middleware.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                InternalError::from_response("no auth context", unauthorized("Authentication required"))
                    .into()
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_extract_cookie_token() {
        use actix_web::{cookie::Cookie, test};

        let req = test::TestRequest::default()
            .cookie(Cookie::new("access", "cookie_token"))
            .to_srv_request();
        assert_eq!(extract_cookie_token(&req, "access"), Some("cookie_token".to_string()));
        assert_eq!(extract_cookie_token(&req, "other"), None);
    }
}
