//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{AuthContext, AuthResponse};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::authorization::AuthorizationGuard;
use crate::services::token::{AccessTokenIssuer, RefreshTokenService};

use super::config::AuthServiceConfig;

/// Authentication service for login and the refresh token endpoints
pub struct AuthService<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    /// User repository for credential lookup
    user_repository: Arc<U>,
    /// Refresh token state machine
    refresh_tokens: Arc<RefreshTokenService<R, U>>,
    /// Access token issuer
    issuer: Arc<AccessTokenIssuer>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R> AuthService<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `refresh_tokens` - Refresh token service
    /// * `issuer` - Access token issuer
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        refresh_tokens: Arc<RefreshTokenService<R, U>>,
        issuer: Arc<AccessTokenIssuer>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            refresh_tokens,
            issuer,
            config,
        }
    }

    /// Create a new account with the `User` role
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user with its assigned id
    /// * `Err(AuthError::UserEmailAlreadyExists)` - A live user owns the email
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::UserEmailAlreadyExists));
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .user_repository
            .create(User::new(0, username, email, password_hash, UserRole::User))
            .await?;

        tracing::info!(
            target: "auth.register",
            user_id = user.id,
            event = "user_registered",
            "User registered"
        );

        Ok(user)
    }

    /// Change the username and email of `user_id`
    ///
    /// Only the user themselves or an administrator may do this.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserUnauthorizedOperation` - Caller is neither owner nor admin
    /// * `AuthError::UserNotFound` - No live user with that id
    /// * `AuthError::UserEmailAlreadyExists` - Email belongs to another live user
    pub async fn update_user(
        &self,
        ctx: &AuthContext,
        user_id: i32,
        username: &str,
        email: &str,
    ) -> DomainResult<User> {
        AuthorizationGuard::ensure_authorized(ctx, user_id)?;

        let mut user = self.find_user(user_id).await?;

        if let Some(owner) = self.user_repository.find_by_email(email).await? {
            if owner.id != user_id {
                return Err(DomainError::Auth(AuthError::UserEmailAlreadyExists));
            }
        }

        user.username = username.to_string();
        user.email = email.to_string();
        user.modified_at = Utc::now();

        let user = self.user_repository.update(&user).await?;

        tracing::info!(
            target: "auth.update",
            user_id = user.id,
            caller = ctx.subject.as_deref().unwrap_or("-"),
            event = "user_updated",
            "User updated"
        );

        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// An unknown email and a wrong password produce the same error.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Access token plus a new root refresh token
    /// * `Err(AuthError::WrongEmailOrPassword)` - Credentials rejected
    pub async fn login(&self, email: &str, password: &str, ip: &str) -> DomainResult<AuthResponse> {
        let user = self.user_repository.find_by_email(email).await?;

        let user = match user {
            Some(user) if Self::verify_password(password, &user.password_hash) => user,
            _ => {
                tracing::warn!(
                    target: "auth.login",
                    ip = ip,
                    event = "login_failed",
                    "Login rejected"
                );
                return Err(DomainError::Auth(AuthError::WrongEmailOrPassword));
            }
        };

        let access_token =
            self.issuer
                .create_access_token(user.id, &user.username, &user.email, user.role)?;
        let issued = self.refresh_tokens.issue_new(user.id, ip).await?;

        tracing::info!(
            target: "auth.login",
            user_id = user.id,
            ip = ip,
            event = "login_succeeded",
            "User logged in"
        );

        let pair = TokenPair::new(
            access_token,
            issued.token,
            self.issuer.lifetime(),
            self.refresh_tokens.refresh_lifetime(),
        );

        Ok(AuthResponse::from_token_pair(pair, &user))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str, ip: &str) -> DomainResult<TokenPair> {
        self.refresh_tokens.rotate(refresh_token, ip).await
    }

    /// Revoke a refresh token (logout)
    pub async fn revoke(&self, refresh_token: &str, ip: &str) -> DomainResult<()> {
        self.refresh_tokens.revoke(refresh_token, ip).await
    }

    /// Load a live user by id
    pub async fn find_user(&self, user_id: i32) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Hash a password with the configured bcrypt cost
    pub fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify_password(password: &str, password_hash: &str) -> bool {
        bcrypt::verify(password, password_hash).unwrap_or(false)
    }
}
