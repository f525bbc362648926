//! Application state and factory
//!
//! This module wires the core services into the application state and
//! provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use sb_core::errors::ConfigError;
use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_core::services::{
    AccessTokenIssuer, AuthService, AuthServiceConfig, ConfigurationProvider, RefreshTokenService,
};
use sb_shared::{AppConfig, CookieConfig};

use crate::handlers::error::json_error_handler;
use crate::middleware::JwtAuth;
use crate::routes::user::{get_user, login, refresh, register, revoke, update_user, AppState};

/// Transport settings for the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub cookies: CookieConfig,
    pub trust_forwarded_headers: bool,
}

impl HttpOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookies: config.auth.cookies.clone(),
            trust_forwarded_headers: config.server.trust_forwarded_headers,
        }
    }
}

/// Build the application state over a pair of repositories
///
/// Fails with `ConfigMissing` when the token configuration is incomplete.
pub fn build_state<U, R>(
    users: Arc<U>,
    tokens: Arc<R>,
    config: &dyn ConfigurationProvider,
    auth_config: AuthServiceConfig,
    http: HttpOptions,
) -> Result<web::Data<AppState<U, R>>, ConfigError>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    let issuer = Arc::new(AccessTokenIssuer::new(config)?);
    let refresh_tokens = Arc::new(RefreshTokenService::new(
        tokens,
        Arc::clone(&users),
        Arc::clone(&issuer),
        config,
    )?);
    let auth_service = Arc::new(AuthService::new(
        users,
        refresh_tokens,
        Arc::clone(&issuer),
        auth_config,
    ));

    Ok(web::Data::new(AppState {
        auth_service,
        issuer,
        cookies: http.cookies,
        trust_forwarded_headers: http.trust_forwarded_headers,
    }))
}

/// Create and configure the application with all dependencies
pub fn create_app<U, R>(
    app_state: web::Data<AppState<U, R>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    let jwt_auth = JwtAuth::new(Arc::clone(&app_state.issuer))
        .with_cookie(&app_state.cookies.access_token_name);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/user")
                .route("/register", web::post().to(register::<U, R>))
                .route("/login", web::post().to(login::<U, R>))
                .route("/refresh", web::post().to(refresh::<U, R>))
                .route(
                    "/revoke",
                    web::post().to(revoke::<U, R>).wrap(jwt_auth.clone()),
                )
                .route(
                    "/update",
                    web::put().to(update_user::<U, R>).wrap(jwt_auth.clone()),
                )
                .route("/{id}", web::get().to(get_user::<U, R>).wrap(jwt_auth)),
        )
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "stockband-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
