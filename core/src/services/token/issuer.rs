//! Access token issuance and verification

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use chrono::Duration;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;
use crate::errors::{ConfigError, DomainError, TokenError};

use super::config::ConfigurationProvider;

/// Mints and verifies HS256 access tokens
///
/// Holds only read-only key material, so one instance is shared by every request.
pub struct AccessTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl AccessTokenIssuer {
    /// Creates a new issuer from the given configuration
    ///
    /// # Errors
    ///
    /// `ConfigMissing` if the signing key, issuer, audience or lifetime is absent.
    pub fn new(config: &dyn ConfigurationProvider) -> Result<Self, ConfigError> {
        if config.signing_key().is_empty() {
            return Err(ConfigError::missing("Jwt:Secret"));
        }
        if config.issuer().is_empty() {
            return Err(ConfigError::missing("Jwt:Issuer"));
        }
        if config.audience().is_empty() {
            return Err(ConfigError::missing("Jwt:Audience"));
        }
        if config.access_token_lifetime() <= Duration::zero() {
            return Err(ConfigError::missing("Jwt:AccessTokenExpiry"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.signing_key()),
            decoding_key: DecodingKey::from_secret(config.signing_key()),
            validation,
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
            lifetime: config.access_token_lifetime(),
        })
    }

    /// Access token lifetime
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Creates a signed access token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(DomainError)` - Signing failed
    pub fn create_access_token(
        &self,
        user_id: i32,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user_id,
            username,
            email,
            role,
            &self.issuer,
            &self.audience,
            self.lifetime,
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Signature, expiry, not-before, issuer and audience are all checked.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::InvalidTokenFormat,
                };
                tracing::debug!(
                    target: "auth.token.invalid",
                    reason = ?e.kind(),
                    "Access token rejected"
                );
                DomainError::Token(error)
            })?;

        Ok(token_data.claims)
    }
}
