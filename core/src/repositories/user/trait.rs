//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Soft-deleted users are returned by `find_by_id` so callers can decide how
/// to treat them; `find_by_email` only sees non-deleted users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    /// Find a non-deleted user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user (with the store-assigned id)
    /// * `Err(AuthError::UserEmailAlreadyExists)` - Another live user has the email
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// Email uniqueness among live users is enforced here as well.
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}
