//! Refresh token rotation, revocation and replay detection

use std::collections::HashSet;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::domain::entities::token::{IssuedRefreshToken, RefreshToken, RevocationReason, TokenPair};
use crate::errors::{AuthError, ConfigError, DomainError, TokenError};
use crate::repositories::{RefreshTokenRepository, UserRepository};

use super::config::ConfigurationProvider;
use super::issuer::AccessTokenIssuer;

/// Bytes of OS randomness in a refresh token
const TOKEN_BYTES: usize = 32;

/// How many times the reuse cascade is recomputed after losing a write race
pub const MAX_CASCADE_ATTEMPTS: usize = 3;

/// Generates a new unguessable refresh token string
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hashes a token for storage and lookup
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Service owning the refresh token state machine
///
/// Every token belongs to a chain linked by `replaced_by_token`. A token that
/// was already consumed and is presented again revokes everything downstream
/// of it.
pub struct RefreshTokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    token_repository: Arc<R>,
    user_repository: Arc<U>,
    issuer: Arc<AccessTokenIssuer>,
    refresh_lifetime: Duration,
}

impl<R, U> RefreshTokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    /// Creates a new refresh token service
    ///
    /// # Arguments
    ///
    /// * `token_repository` - Refresh token store
    /// * `user_repository` - User store, used to mint access tokens on rotation
    /// * `issuer` - Shared access token issuer
    /// * `config` - Provides the refresh token lifetime
    pub fn new(
        token_repository: Arc<R>,
        user_repository: Arc<U>,
        issuer: Arc<AccessTokenIssuer>,
        config: &dyn ConfigurationProvider,
    ) -> Result<Self, ConfigError> {
        let refresh_lifetime = config.refresh_token_lifetime();
        if refresh_lifetime <= Duration::zero() {
            return Err(ConfigError::missing("Jwt:RefreshTokenExpiry"));
        }

        Ok(Self {
            token_repository,
            user_repository,
            issuer,
            refresh_lifetime,
        })
    }

    /// Refresh token lifetime
    pub fn refresh_lifetime(&self) -> Duration {
        self.refresh_lifetime
    }

    /// Issues a new root refresh token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedRefreshToken)` - The stored record and the plaintext token
    /// * `Err(DomainError)` - The store rejected the insert
    pub async fn issue_new(&self, user_id: i32, ip: &str) -> Result<IssuedRefreshToken, DomainError> {
        let token = generate_refresh_token();
        let record = RefreshToken::new(user_id, hash_token(&token), ip, self.refresh_lifetime);
        let record = self.token_repository.insert(record).await?;

        tracing::info!(
            target: "auth.token.issued",
            user_id = user_id,
            token_id = %record.id,
            ip = ip,
            "Refresh token issued"
        );

        Ok(IssuedRefreshToken { token, record })
    }

    /// Exchanges a refresh token for a new access and refresh token pair
    ///
    /// The presented token is retired and its successor inserted in one
    /// conditional store operation. Presenting a token that is no longer
    /// active, or losing the race to retire it, revokes the whole chain
    /// downstream of it.
    ///
    /// # Errors
    ///
    /// * `TokenError::NotFound` - Unknown token
    /// * `TokenError::Expired` - Token expired without being revoked
    /// * `TokenError::TokenReuseDetected` - Token was already consumed or revoked
    /// * `AuthError::UserNotFound` - Owning user missing or deleted
    pub async fn rotate(&self, presented: &str, ip: &str) -> Result<TokenPair, DomainError> {
        let token_hash = hash_token(presented);

        let token = self
            .token_repository
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::NotFound))?;

        // One clock reading decides both expiry and activity
        let now = Utc::now();

        if !token.is_revoked() && token.is_expired_at(now) {
            tracing::info!(
                target: "auth.token.invalid",
                token_id = %token.id,
                user_id = token.user_id,
                ip = ip,
                "Expired refresh token presented"
            );
            return Err(DomainError::Token(TokenError::Expired));
        }

        if !token.is_active_at(now) {
            return Err(self.handle_reuse(&token_hash, ip).await);
        }

        let user = self
            .user_repository
            .find_by_id(token.user_id)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let access_token = self
            .issuer
            .create_access_token(user.id, &user.username, &user.email, user.role)?;

        let successor_token = generate_refresh_token();
        let successor = RefreshToken::new(
            user.id,
            hash_token(&successor_token),
            ip,
            self.refresh_lifetime,
        );

        let mut retired = token;
        retired.mark_replaced(ip, &successor.token_hash);

        let successor = match self.token_repository.replace(&retired, successor).await {
            Ok(successor) => successor,
            Err(DomainError::ConcurrencyConflict { .. }) => {
                tracing::warn!(
                    target: "auth.token.invalid",
                    token_id = %retired.id,
                    ip = ip,
                    "Lost rotation race, treating as replay"
                );
                return Err(self.handle_reuse(&token_hash, ip).await);
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            target: "auth.token.rotated",
            user_id = user.id,
            token_id = %retired.id,
            successor_id = %successor.id,
            ip = ip,
            "Refresh token rotated"
        );

        Ok(TokenPair::new(
            access_token,
            successor_token,
            self.issuer.lifetime(),
            self.refresh_lifetime,
        ))
    }

    /// Revokes a refresh token on request
    ///
    /// Revoking a token that is no longer active is reported, not ignored,
    /// and leaves the first revocation's fields intact.
    ///
    /// # Errors
    ///
    /// * `TokenError::NotFound` - Unknown token
    /// * `TokenError::InvalidRefreshToken` - Token already revoked or expired
    pub async fn revoke(&self, presented: &str, ip: &str) -> Result<(), DomainError> {
        let token = self
            .token_repository
            .find_by_token_hash(&hash_token(presented))
            .await?
            .ok_or(DomainError::Token(TokenError::NotFound))?;

        if !token.is_active() {
            tracing::info!(
                target: "auth.token.invalid",
                token_id = %token.id,
                ip = ip,
                "Revoke requested for inactive refresh token"
            );
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let mut revoked = token;
        revoked.mark_revoked(ip);

        match self.token_repository.update(&revoked).await {
            Ok(_) => {
                tracing::info!(
                    target: "auth.token.revoked",
                    user_id = revoked.user_id,
                    token_id = %revoked.id,
                    ip = ip,
                    "Refresh token revoked"
                );
                Ok(())
            }
            Err(DomainError::ConcurrencyConflict { .. }) => {
                Err(DomainError::Token(TokenError::InvalidRefreshToken))
            }
            Err(e) => Err(e),
        }
    }

    /// Revokes the chain downstream of a replayed token and returns the error to surface
    async fn handle_reuse(&self, token_hash: &str, ip: &str) -> DomainError {
        for attempt in 1..=MAX_CASCADE_ATTEMPTS {
            let chain = match self.collect_chain(token_hash, ip).await {
                Ok(chain) => chain,
                Err(e) => return e,
            };

            let revoked = if chain.is_empty() {
                Ok(0)
            } else {
                self.token_repository.revoke_chain(&chain).await
            };

            match revoked {
                Ok(count) => {
                    tracing::error!(
                        target: "auth.token.reuse_detected",
                        user_id = chain.first().map(|t| t.user_id),
                        revoked = count,
                        ip = ip,
                        "Refresh token reuse detected, chain revoked"
                    );
                    return DomainError::Token(TokenError::TokenReuseDetected);
                }
                Err(DomainError::ConcurrencyConflict { .. }) => {
                    tracing::warn!(
                        target: "auth.token.reuse_detected",
                        attempt = attempt,
                        "Chain changed during reuse cascade, retrying"
                    );
                }
                Err(e) => return e,
            }
        }

        DomainError::Internal {
            message: format!(
                "Reuse cascade did not settle after {} attempts",
                MAX_CASCADE_ATTEMPTS
            ),
        }
    }

    /// Walks the chain forward from `token_hash`, returning every token that
    /// still needs to be marked as reuse-revoked
    async fn collect_chain(&self, token_hash: &str, ip: &str) -> Result<Vec<RefreshToken>, DomainError> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(token_hash.to_string());

        while let Some(hash) = next.take() {
            if !visited.insert(hash.clone()) {
                tracing::warn!(
                    target: "auth.token.reuse_detected",
                    "Cycle in refresh token chain"
                );
                break;
            }

            let Some(mut token) = self.token_repository.find_by_token_hash(&hash).await? else {
                break;
            };

            next = token.replaced_by_token.clone();

            if token.reason_revoked != RevocationReason::ReuseDetected {
                token.mark_reuse_detected(ip);
                chain.push(token);
            }
        }

        Ok(chain)
    }
}
