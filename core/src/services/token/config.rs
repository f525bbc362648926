//! Configuration for the token services

use chrono::Duration;
use sb_shared::JwtConfig;

use crate::errors::ConfigError;

/// Source of signing and lifetime settings for token services
pub trait ConfigurationProvider: Send + Sync {
    /// Symmetric signing key
    fn signing_key(&self) -> &[u8];

    fn issuer(&self) -> &str;

    fn audience(&self) -> &str;

    fn access_token_lifetime(&self) -> Duration;

    fn refresh_token_lifetime(&self) -> Duration;
}

/// Validated configuration for the token services
///
/// Only constructible with every value present, so the services never see a
/// partially configured provider.
#[derive(Clone)]
pub struct TokenServiceConfig {
    jwt_secret: String,
    issuer: String,
    audience: String,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl TokenServiceConfig {
    /// Creates a configuration from explicit values
    ///
    /// # Errors
    ///
    /// `ConfigMissing` naming the first absent value.
    pub fn new(
        jwt_secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            jwt_secret: jwt_secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_lifetime,
            refresh_token_lifetime,
        };

        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::missing("Jwt:Secret"));
        }
        if config.issuer.trim().is_empty() {
            return Err(ConfigError::missing("Jwt:Issuer"));
        }
        if config.audience.trim().is_empty() {
            return Err(ConfigError::missing("Jwt:Audience"));
        }
        if config.access_token_lifetime <= Duration::zero() {
            return Err(ConfigError::missing("Jwt:AccessTokenExpiry"));
        }
        if config.refresh_token_lifetime <= Duration::zero() {
            return Err(ConfigError::missing("Jwt:RefreshTokenExpiry"));
        }

        Ok(config)
    }

    /// Adapts the loaded application configuration
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, ConfigError> {
        Self::new(
            jwt.secret.clone(),
            jwt.issuer.clone(),
            jwt.audience.clone().unwrap_or_default(),
            Duration::seconds(jwt.access_token_expiry),
            Duration::seconds(jwt.refresh_token_expiry),
        )
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .finish()
    }
}

impl ConfigurationProvider for TokenServiceConfig {
    fn signing_key(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    fn issuer(&self) -> &str {
        &self.issuer
    }

    fn audience(&self) -> &str {
        &self.audience
    }

    fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }

    fn refresh_token_lifetime(&self) -> Duration {
        self.refresh_token_lifetime
    }
}
