//! Mock implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// Mock refresh token repository for testing
///
/// Conditional writes compare versions under the write lock.
#[derive(Clone)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockRefreshTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Snapshot of every stored token
    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    /// Overwrite a stored record without a version check
    pub async fn put(&self, token: RefreshToken) {
        self.tokens.write().await.insert(token.token_hash.clone(), token);
    }

    fn conflict() -> DomainError {
        DomainError::ConcurrencyConflict {
            resource: "refresh_token".to_string(),
        }
    }

    fn check_version(
        tokens: &HashMap<String, RefreshToken>,
        token: &RefreshToken,
    ) -> Result<(), DomainError> {
        match tokens.get(&token.token_hash) {
            Some(stored) if stored.version == token.version => Ok(()),
            Some(_) => Err(Self::conflict()),
            None => Err(DomainError::Internal {
                message: "Refresh token does not exist".to_string(),
            }),
        }
    }

    fn bumped(token: &RefreshToken) -> RefreshToken {
        let mut updated = token.clone();
        updated.version += 1;
        updated
    }
}

impl Default for MockRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn update(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        Self::check_version(&tokens, token)?;

        let updated = Self::bumped(token);
        tokens.insert(updated.token_hash.clone(), updated.clone());
        Ok(updated)
    }

    async fn replace(&self, retired: &RefreshToken, successor: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        Self::check_version(&tokens, retired)?;

        if tokens.contains_key(&successor.token_hash) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        let updated = Self::bumped(retired);
        tokens.insert(updated.token_hash.clone(), updated);
        tokens.insert(successor.token_hash.clone(), successor.clone());
        Ok(successor)
    }

    async fn revoke_chain(&self, batch: &[RefreshToken]) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;

        for token in batch {
            Self::check_version(&tokens, token)?;
        }

        for token in batch {
            let updated = Self::bumped(token);
            tokens.insert(updated.token_hash.clone(), updated);
        }

        Ok(batch.len())
    }
}
