//! Repository for the `emails` table.

use aliasly_core::models::Email;
use sqlx::PgPool;

use crate::models::email::EmailRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, address, verified, token, created_at, updated_at, deleted_at";

/// Provides CRUD operations for registered emails.
pub struct EmailRepo;

impl EmailRepo {
    /// Insert a new email, returning the created row.
    pub async fn create(pool: &PgPool, email: &Email) -> Result<EmailRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO emails (id, user_id, address, verified, token, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailRow>(&query)
            .bind(&email.id)
            .bind(&email.user_id)
            .bind(&email.address)
            .bind(email.verified)
            .bind(&email.token)
            .bind(email.created_at)
            .bind(email.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Find the live, unverified email holding exactly this token.
    pub async fn find_pending_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<EmailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emails
             WHERE token = $1 AND verified = false AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, EmailRow>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Find a live email by ID that belongs to `user_id` and is verified.
    pub async fn find_verified(
        pool: &PgPool,
        id: &str,
        user_id: &str,
    ) -> Result<Option<EmailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emails
             WHERE id = $1 AND user_id = $2 AND verified = true AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, EmailRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's live emails, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<EmailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emails
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, EmailRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Persist the verification state of a live email.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(pool: &PgPool, email: &Email) -> Result<Option<EmailRow>, sqlx::Error> {
        let query = format!(
            "UPDATE emails SET
                address = $2,
                verified = $3,
                token = $4,
                updated_at = $5
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailRow>(&query)
            .bind(&email.id)
            .bind(&email.address)
            .bind(email.verified)
            .bind(&email.token)
            .bind(email.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an email by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE emails SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
