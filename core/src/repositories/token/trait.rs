//! Refresh token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are looked up by the SHA-256 digest of the token string, never by
/// the plaintext.
///
/// # Concurrency
/// Every write that mutates an existing record is conditional on the record's
/// `version` being the one that was read. A lost condition is reported as
/// `DomainError::ConcurrencyConflict` so callers can tell it apart from
/// storage failures. Successful writes return the record with its bumped version.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Insert a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored token
    /// * `Err(DomainError)` - Insert failed (e.g., duplicate hash)
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Update revocation fields of an existing token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The updated token with `version + 1`
    /// * `Err(DomainError::ConcurrencyConflict)` - The stored version differs from `token.version`
    /// * `Err(DomainError)` - Storage error occurred
    async fn update(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Retire `retired` and insert `successor` as one atomic operation
    ///
    /// `retired` carries the new revocation fields and the version that was
    /// read. Either both writes happen or neither does.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored successor
    /// * `Err(DomainError::ConcurrencyConflict)` - `retired` changed since it was read
    async fn replace(&self, retired: &RefreshToken, successor: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Apply a batch of conditional updates atomically
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens written
    /// * `Err(DomainError::ConcurrencyConflict)` - Any token changed since it was read; nothing written
    async fn revoke_chain(&self, tokens: &[RefreshToken]) -> Result<usize, DomainError>;
}
