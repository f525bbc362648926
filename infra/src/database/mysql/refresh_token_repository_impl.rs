//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Records are keyed by the SHA-256 digest computed in the core. Every
//! mutating statement is conditioned on the `version` column and bumps it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use sb_core::domain::entities::token::{RefreshToken, RevocationReason};
use sb_core::errors::DomainError;
use sb_core::repositories::RefreshTokenRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, token_hash, created_by_ip, created_at, expires_at,
           revoked_at, revoked_by_ip, reason_revoked, replaced_by_token,
           is_deleted, version
    FROM refresh_tokens
"#;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_error(context: &str, e: sqlx::Error) -> DomainError {
        tracing::error!(error = %e, context = context, "Refresh token query failed");
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }

    fn conflict() -> DomainError {
        DomainError::ConcurrencyConflict {
            resource: "refresh_token".to_string(),
        }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &MySqlRow) -> Result<RefreshToken, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;
        let reason: String = row
            .try_get("reason_revoked")
            .map_err(|e| get_err("reason_revoked", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| get_err("user_id", e))?,
            token_hash: row.try_get("token_hash").map_err(|e| get_err("token_hash", e))?,
            created_by_ip: row
                .try_get("created_by_ip")
                .map_err(|e| get_err("created_by_ip", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| get_err("expires_at", e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| get_err("revoked_at", e))?,
            revoked_by_ip: row
                .try_get("revoked_by_ip")
                .map_err(|e| get_err("revoked_by_ip", e))?,
            reason_revoked: reason
                .parse::<RevocationReason>()
                .map_err(|message| DomainError::Internal { message })?,
            replaced_by_token: row
                .try_get("replaced_by_token")
                .map_err(|e| get_err("replaced_by_token", e))?,
            is_deleted: row.try_get("is_deleted").map_err(|e| get_err("is_deleted", e))?,
            version: row.try_get("version").map_err(|e| get_err("version", e))?,
        })
    }

    async fn insert_in(
        tx: &mut Transaction<'_, MySql>,
        token: &RefreshToken,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_by_ip, created_at, expires_at,
                revoked_at, revoked_by_ip, reason_revoked, replaced_by_token,
                is_deleted, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id)
            .bind(&token.token_hash)
            .bind(&token.created_by_ip)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.revoked_at)
            .bind(&token.revoked_by_ip)
            .bind(token.reason_revoked.as_str())
            .bind(&token.replaced_by_token)
            .bind(token.is_deleted)
            .bind(token.version)
            .execute(&mut **tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Validation {
                    message: "Token already exists".to_string(),
                },
                e => Self::db_error("Failed to insert refresh token", e),
            })?;

        Ok(())
    }

    /// Conditional update of the mutable columns; `Ok(false)` when the version moved
    async fn update_in(
        tx: &mut Transaction<'_, MySql>,
        token: &RefreshToken,
        require_active: bool,
    ) -> Result<bool, DomainError> {
        let query = if require_active {
            r#"
                UPDATE refresh_tokens
                SET revoked_at = ?, revoked_by_ip = ?, reason_revoked = ?,
                    replaced_by_token = ?, is_deleted = ?, version = version + 1
                WHERE id = ? AND version = ? AND revoked_at IS NULL
            "#
        } else {
            r#"
                UPDATE refresh_tokens
                SET revoked_at = ?, revoked_by_ip = ?, reason_revoked = ?,
                    replaced_by_token = ?, is_deleted = ?, version = version + 1
                WHERE id = ? AND version = ?
            "#
        };

        let result = sqlx::query(query)
            .bind(token.revoked_at)
            .bind(&token.revoked_by_ip)
            .bind(token.reason_revoked.as_str())
            .bind(&token.replaced_by_token)
            .bind(token.is_deleted)
            .bind(token.id.to_string())
            .bind(token.version)
            .execute(&mut **tx)
            .await
            .map_err(|e| Self::db_error("Failed to update refresh token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn begin(&self) -> Result<Transaction<'_, MySql>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| Self::db_error("Failed to begin transaction", e))
    }

    async fn commit(tx: Transaction<'_, MySql>) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(|e| Self::db_error("Failed to commit transaction", e))
    }

    async fn rollback(tx: Transaction<'_, MySql>) -> Result<(), DomainError> {
        tx.rollback()
            .await
            .map_err(|e| Self::db_error("Failed to roll back transaction", e))
    }

    fn bumped(token: &RefreshToken) -> RefreshToken {
        let mut updated = token.clone();
        updated.version += 1;
        updated
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!("{} WHERE token_hash = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("Failed to find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tx = self.begin().await?;
        Self::insert_in(&mut tx, &token).await?;
        Self::commit(tx).await?;
        Ok(token)
    }

    async fn update(&self, token: &RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tx = self.begin().await?;

        if !Self::update_in(&mut tx, token, false).await? {
            Self::rollback(tx).await?;
            return Err(Self::conflict());
        }

        Self::commit(tx).await?;
        Ok(Self::bumped(token))
    }

    async fn replace(&self, retired: &RefreshToken, successor: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tx = self.begin().await?;

        // `retired` already carries its revocation; the row must still be active
        if !Self::update_in(&mut tx, retired, true).await? {
            Self::rollback(tx).await?;
            return Err(Self::conflict());
        }

        Self::insert_in(&mut tx, &successor).await?;
        Self::commit(tx).await?;

        Ok(successor)
    }

    async fn revoke_chain(&self, tokens: &[RefreshToken]) -> Result<usize, DomainError> {
        let mut tx = self.begin().await?;

        for token in tokens {
            if !Self::update_in(&mut tx, token, false).await? {
                Self::rollback(tx).await?;
                return Err(Self::conflict());
            }
        }

        Self::commit(tx).await?;
        Ok(tokens.len())
    }
}
