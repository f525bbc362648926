//! Unit tests for authentication service

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::AuthContext;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockRefreshTokenRepository, MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{
    hash_token, AccessTokenIssuer, RefreshTokenService, TokenServiceConfig,
};

const PASSWORD: &str = "AbcDf@#!1233";

fn config() -> AuthServiceConfig {
    // Lowest cost bcrypt accepts, keeps the tests fast
    AuthServiceConfig { bcrypt_cost: 4 }
}

async fn setup() -> (
    AuthService<MockUserRepository, MockRefreshTokenRepository>,
    Arc<MockRefreshTokenRepository>,
) {
    let token_config = TokenServiceConfig::new(
        "test-secret-key-with-enough-length-for-hs256",
        "stockband",
        "stockband-api",
        Duration::minutes(15),
        Duration::days(7),
    )
    .unwrap();

    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockRefreshTokenRepository::new());
    let issuer = Arc::new(AccessTokenIssuer::new(&token_config).unwrap());
    let refresh = Arc::new(
        RefreshTokenService::new(tokens.clone(), users.clone(), issuer.clone(), &token_config)
            .unwrap(),
    );
    let service = AuthService::new(users.clone(), refresh, issuer, config());

    let hash = service.hash_password(PASSWORD).unwrap();
    users
        .create(User::new(500, "tester", "test@gmail.com", hash, UserRole::User))
        .await
        .unwrap();

    (service, tokens)
}

#[tokio::test]
async fn test_login_success() {
    let (service, tokens) = setup().await;

    let response = service.login("test@gmail.com", PASSWORD, "1.1.1.1").await.unwrap();

    assert_eq!(response.user_id, 500);
    assert_eq!(response.role, "User");
    assert_eq!(response.expires_in, 15 * 60);

    let stored = tokens.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].token_hash, hash_token(&response.refresh_token));
    assert_eq!(stored[0].created_by_ip, "1.1.1.1");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, tokens) = setup().await;

    let result = service.login("test@gmail.com", "test_wrong@3#1d", "1.1.1.1").await;

    assert_eq!(result, Err(DomainError::Auth(AuthError::WrongEmailOrPassword)));
    assert!(tokens.all().await.is_empty());
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let (service, _) = setup().await;

    let result = service.login("test_wrong@com.pl", PASSWORD, "1.1.1.1").await;

    assert_eq!(result, Err(DomainError::Auth(AuthError::WrongEmailOrPassword)));
}

#[tokio::test]
async fn test_login_then_refresh_then_revoke() {
    let (service, _) = setup().await;
    let login = service.login("test@gmail.com", PASSWORD, "1.1.1.1").await.unwrap();

    let pair = service.refresh(&login.refresh_token, "1.1.1.1").await.unwrap();
    service.revoke(&pair.refresh_token, "1.1.1.1").await.unwrap();

    assert_eq!(
        service.refresh(&pair.refresh_token, "1.1.1.1").await,
        Err(DomainError::Token(TokenError::TokenReuseDetected))
    );
}

#[tokio::test]
async fn test_find_user() {
    let (service, _) = setup().await;

    assert_eq!(service.find_user(500).await.unwrap().email, "test@gmail.com");
    assert_eq!(
        service.find_user(1).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    );
}

fn ctx(subject: &str, role: &str) -> AuthContext {
    AuthContext::new(Some(subject.to_string()), vec![role.to_string()])
}

#[tokio::test]
async fn test_register_then_login() {
    let (service, _) = setup().await;

    let user = service
        .register("newcomer", "new@gmail.com", "Str0ngPassw0rd!")
        .await
        .unwrap();

    assert_ne!(user.id, 0);
    assert_eq!(user.role, UserRole::User);
    assert_ne!(user.password_hash, "Str0ngPassw0rd!");

    let response = service.login("new@gmail.com", "Str0ngPassw0rd!", "1.1.1.1").await.unwrap();
    assert_eq!(response.user_id, user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (service, _) = setup().await;

    assert_eq!(
        service.register("other", "test@gmail.com", PASSWORD).await,
        Err(DomainError::Auth(AuthError::UserEmailAlreadyExists))
    );
}

#[tokio::test]
async fn test_update_user_by_owner() {
    let (service, _) = setup().await;

    let user = service
        .update_user(&ctx("500", "User"), 500, "renamed", "renamed@gmail.com")
        .await
        .unwrap();

    assert_eq!(user.username, "renamed");
    assert_eq!(service.find_user(500).await.unwrap().email, "renamed@gmail.com");
    assert!(user.modified_at >= user.created_at);
}

#[tokio::test]
async fn test_update_user_by_admin() {
    let (service, _) = setup().await;

    let user = service
        .update_user(&ctx("1", "Admin"), 500, "by-admin", "test@gmail.com")
        .await
        .unwrap();

    assert_eq!(user.username, "by-admin");
}

#[tokio::test]
async fn test_update_user_by_other_user_is_denied() {
    let (service, _) = setup().await;

    assert_eq!(
        service
            .update_user(&ctx("501", "User"), 500, "hijacked", "x@gmail.com")
            .await,
        Err(DomainError::Auth(AuthError::UserUnauthorizedOperation))
    );
    assert_eq!(service.find_user(500).await.unwrap().username, "tester");
}

#[tokio::test]
async fn test_update_user_email_taken() {
    let (service, _) = setup().await;
    service.register("second", "second@gmail.com", PASSWORD).await.unwrap();

    assert_eq!(
        service
            .update_user(&ctx("500", "User"), 500, "tester", "second@gmail.com")
            .await,
        Err(DomainError::Auth(AuthError::UserEmailAlreadyExists))
    );
}

#[tokio::test]
async fn test_update_missing_user() {
    let (service, _) = setup().await;

    assert_eq!(
        service
            .update_user(&ctx("1", "Admin"), 777, "ghost", "ghost@gmail.com")
            .await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    );
}

#[test]
fn test_hash_password_is_salted() {
    let issuer_config = TokenServiceConfig::new(
        "secret",
        "i",
        "a",
        Duration::minutes(1),
        Duration::days(1),
    )
    .unwrap();
    let users = Arc::new(MockUserRepository::new());
    let issuer = Arc::new(AccessTokenIssuer::new(&issuer_config).unwrap());
    let refresh = Arc::new(
        RefreshTokenService::new(
            Arc::new(MockRefreshTokenRepository::new()),
            users.clone(),
            issuer.clone(),
            &issuer_config,
        )
        .unwrap(),
    );
    let service = AuthService::new(users, refresh, issuer, config());

    let a = service.hash_password(PASSWORD).unwrap();
    let b = service.hash_password(PASSWORD).unwrap();

    assert_ne!(a, b);
    assert!(bcrypt::verify(PASSWORD, &a).unwrap());
}
