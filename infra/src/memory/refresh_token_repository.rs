//! In-memory refresh token store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sb_core::domain::entities::token::RefreshToken;
use sb_core::errors::DomainError;
use sb_core::repositories::RefreshTokenRepository;

/// Refresh tokens held in process memory
///
/// Conditional writes compare versions while holding the write lock, so a
/// batch is observed either entirely or not at all.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    fn ensure_version(
        tokens: &HashMap<String, RefreshToken>,
        token: &RefreshToken,
    ) -> Result<(), DomainError> {
        let stored = tokens
            .get(&token.token_hash)
            .ok_or_else(|| DomainError::Internal {
                message: format!("Refresh token {} does not exist", token.id),
            })?;

        if stored.version != token.version {
            return Err(DomainError::ConcurrencyConflict {
                resource: "refresh_token".to_string(),
            });
        }

        Ok(())
    }

    fn store_bumped(tokens: &mut HashMap<String, RefreshToken>, token: &RefreshToken) -> RefreshToken {
        let mut updated = token.clone();
        updated.version += 1;
        tokens.insert(updated.token_hash.clone(), updated.clone());
        updated
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

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
        Self::ensure_version(&tokens, token)?;
        Ok(Self::store_bumped(&mut tokens, token))
    }

    async fn replace(&self, retired: &RefreshToken, successor: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        Self::ensure_version(&tokens, retired)?;

        if tokens.contains_key(&successor.token_hash) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        Self::store_bumped(&mut tokens, retired);
        tokens.insert(successor.token_hash.clone(), successor.clone());
        Ok(successor)
    }

    async fn revoke_chain(&self, batch: &[RefreshToken]) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;

        for token in batch {
            Self::ensure_version(&tokens, token)?;
        }
        for token in batch {
            Self::store_bumped(&mut tokens, token);
        }

        Ok(batch.len())
    }
}
