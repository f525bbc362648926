//! In-memory user store

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sb_core::domain::entities::user::User;
use sb_core::errors::{AuthError, DomainError};
use sb_core::repositories::UserRepository;

/// Users held in process memory, ids assigned sequentially
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i32, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| !u.is_deleted && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| !u.is_deleted && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AuthError::UserEmailAlreadyExists.into());
        }

        if user.id <= 0 || users.contains_key(&user.id) {
            user.id = users.keys().next_back().copied().unwrap_or(0) + 1;
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AuthError::UserNotFound.into());
        }
        if users.values().any(|u| {
            u.id != user.id && !u.is_deleted && u.email.eq_ignore_ascii_case(&user.email)
        }) {
            return Err(AuthError::UserEmailAlreadyExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::domain::entities::user::UserRole;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new(0, "jdoe", "jdoe@example.com", "h", UserRole::Admin))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(repo.find_by_email("JDOE@example.com").await.unwrap().unwrap().id, 1);
        assert_eq!(
            repo.create(User::new(0, "x", "jdoe@example.com", "h", UserRole::User))
                .await,
            Err(DomainError::Auth(AuthError::UserEmailAlreadyExists))
        );
    }

    #[tokio::test]
    async fn test_explicit_id_kept() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new(500, "a", "a@example.com", "h", UserRole::User))
            .await
            .unwrap();

        assert_eq!(user.id, 500);
        assert!(repo.find_by_id(500).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let mut a = repo
            .create(User::new(0, "a", "a@example.com", "h", UserRole::User))
            .await
            .unwrap();
        repo.create(User::new(0, "b", "b@example.com", "h", UserRole::User))
            .await
            .unwrap();

        a.username = "renamed".to_string();
        assert_eq!(repo.update(&a).await.unwrap().username, "renamed");
        assert_eq!(repo.find_by_id(a.id).await.unwrap().unwrap().username, "renamed");

        a.email = "B@example.com".to_string();
        assert_eq!(
            repo.update(&a).await,
            Err(DomainError::Auth(AuthError::UserEmailAlreadyExists))
        );

        let ghost = User::new(99, "g", "g@example.com", "h", UserRole::User);
        assert_eq!(
            repo.update(&ghost).await,
            Err(DomainError::Auth(AuthError::UserNotFound))
        );
    }
}
