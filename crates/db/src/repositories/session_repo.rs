//! Repository for the `sessions` table (refresh tokens).

use sqlx::PgPool;

use donut_core::types::{DbId, Timestamp};

use crate::models::session::Session;

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at";

/// Provides refresh-token session operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live (unrevoked, unexpired) session by refresh token hash.
    pub async fn find_valid_by_hash(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a session by refresh token hash. Returns `true` if a live
    /// session was revoked.
    pub async fn revoke_by_hash(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = NOW()
             WHERE refresh_token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(refresh_token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
