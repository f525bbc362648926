//! Tests for the token services

mod config_tests;

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::user::{User, UserRole};
use crate::repositories::{MockRefreshTokenRepository, MockUserRepository, RefreshTokenRepository};

use super::{AccessTokenIssuer, RefreshTokenService, TokenServiceConfig};

pub(super) const SECRET: &str = "test-secret-key-with-enough-length-for-hs256";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::new(
        SECRET,
        "stockband",
        "stockband-api",
        Duration::minutes(15),
        Duration::days(7),
    )
    .unwrap()
}

pub(super) fn test_issuer() -> Arc<AccessTokenIssuer> {
    Arc::new(AccessTokenIssuer::new(&test_config()).unwrap())
}

pub(super) fn test_user(id: i32) -> User {
    User::new(id, "jdoe", "jdoe@example.com", "hash", UserRole::User)
}

pub(super) fn service_with<R: RefreshTokenRepository>(
    tokens: Arc<R>,
) -> RefreshTokenService<R, MockUserRepository> {
    let users = Arc::new(MockUserRepository::with_users(vec![test_user(42)]));
    RefreshTokenService::new(tokens, users, test_issuer(), &test_config()).unwrap()
}

pub(super) fn test_service() -> (
    RefreshTokenService<MockRefreshTokenRepository, MockUserRepository>,
    Arc<MockRefreshTokenRepository>,
) {
    let tokens = Arc::new(MockRefreshTokenRepository::new());
    (service_with(tokens.clone()), tokens)
}
