//! Unit tests for token service configuration

use chrono::Duration;
use sb_shared::JwtConfig;

use crate::errors::ConfigError;
use crate::services::token::{ConfigurationProvider, TokenServiceConfig};

fn missing_key(result: Result<TokenServiceConfig, ConfigError>) -> String {
    match result {
        Err(ConfigError::ConfigMissing { key }) => key,
        Ok(_) => panic!("expected ConfigMissing"),
    }
}

#[test]
fn test_from_jwt_config() {
    let jwt = JwtConfig::new("secret");
    let config = TokenServiceConfig::from_jwt_config(&jwt).unwrap();

    assert_eq!(config.signing_key(), b"secret");
    assert_eq!(config.issuer(), "stockband");
    assert_eq!(config.audience(), "stockband-api");
    assert_eq!(config.access_token_lifetime(), Duration::seconds(jwt.access_token_expiry));
    assert_eq!(config.refresh_token_lifetime(), Duration::seconds(jwt.refresh_token_expiry));
}

#[test]
fn test_each_absent_value_is_reported() {
    let ok = JwtConfig::new("secret");

    let mut jwt = ok.clone();
    jwt.secret = String::new();
    assert_eq!(missing_key(TokenServiceConfig::from_jwt_config(&jwt)), "Jwt:Secret");

    let mut jwt = ok.clone();
    jwt.issuer = "  ".to_string();
    assert_eq!(missing_key(TokenServiceConfig::from_jwt_config(&jwt)), "Jwt:Issuer");

    let mut jwt = ok.clone();
    jwt.audience = None;
    assert_eq!(missing_key(TokenServiceConfig::from_jwt_config(&jwt)), "Jwt:Audience");

    let mut jwt = ok.clone();
    jwt.access_token_expiry = 0;
    assert_eq!(
        missing_key(TokenServiceConfig::from_jwt_config(&jwt)),
        "Jwt:AccessTokenExpiry"
    );

    let mut jwt = ok;
    jwt.refresh_token_expiry = -1;
    assert_eq!(
        missing_key(TokenServiceConfig::from_jwt_config(&jwt)),
        "Jwt:RefreshTokenExpiry"
    );
}

#[test]
fn test_debug_redacts_secret() {
    let config = TokenServiceConfig::new(
        "super-secret",
        "i",
        "a",
        Duration::minutes(1),
        Duration::days(1),
    )
    .unwrap();

    let debug = format!("{:?}", config);
    assert!(!debug.contains("super-secret"));
}
