//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sb_core::domain::entities::user::{User, UserRole};
use sb_core::errors::{AuthError, DomainError};
use sb_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_error(e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("Database query failed: {}", e),
        }
    }

    /// Like `db_error`, but a hit on the live-email unique index becomes
    /// `UserEmailAlreadyExists`
    fn write_error(e: sqlx::Error) -> DomainError {
        let duplicate = e
            .as_database_error()
            .map_or(false, |db| db.is_unique_violation());

        if duplicate {
            AuthError::UserEmailAlreadyExists.into()
        } else {
            Self::db_error(e)
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let role: String = row.try_get("role").map_err(|e| get_err("role", e))?;

        Ok(User {
            id: row.try_get("id").map_err(|e| get_err("id", e))?,
            username: row.try_get("username").map_err(|e| get_err("username", e))?,
            email: row.try_get("email").map_err(|e| get_err("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| get_err("password_hash", e))?,
            role: role
                .parse::<UserRole>()
                .map_err(|message| DomainError::Internal { message })?,
            is_deleted: row.try_get("is_deleted").map_err(|e| get_err("is_deleted", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            modified_at: row
                .try_get::<DateTime<Utc>, _>("modified_at")
                .map_err(|e| get_err("modified_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, role, is_deleted, created_at, modified_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, role, is_deleted, created_at, modified_at
            FROM users
            WHERE email = ? AND is_deleted = 0
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (username, email, password_hash, role, is_deleted, created_at, modified_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.is_deleted)
            .bind(user.created_at)
            .bind(user.modified_at)
            .execute(&self.pool)
            .await
            .map_err(Self::write_error)?;

        let id = i32::try_from(result.last_insert_id()).map_err(|_| DomainError::Internal {
            message: "User id out of range".to_string(),
        })?;

        tracing::info!(user_id = id, "User created");

        Ok(User { id, ..user })
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET username = ?, email = ?, role = ?, is_deleted = ?, modified_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.role.as_str())
            .bind(user.is_deleted)
            .bind(user.modified_at)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(Self::write_error)?;

        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(AuthError::UserNotFound.into());
        }

        tracing::info!(user_id = user.id, "User updated");

        Ok(user.clone())
    }
}
