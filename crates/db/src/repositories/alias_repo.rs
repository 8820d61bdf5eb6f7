//! Repository for the `aliases` table.

use aliasly_core::models::Alias;
use sqlx::PgPool;

use crate::models::alias::AliasRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, email_id, alias_address, created_at, updated_at, deleted_at";

/// Provides CRUD operations for aliases.
pub struct AliasRepo;

impl AliasRepo {
    /// Insert a new alias, returning the created row.
    pub async fn create(pool: &PgPool, alias: &Alias) -> Result<AliasRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO aliases (id, user_id, email_id, alias_address, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(&alias.id)
            .bind(&alias.user_id)
            .bind(&alias.email_id)
            .bind(&alias.alias_address)
            .bind(alias.created_at)
            .bind(alias.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Find an alias by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<AliasRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM aliases WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an alias by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<AliasRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM aliases WHERE id = $1");
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the alias holding `alias_address`, including soft-deleted rows.
    pub async fn find_by_address_include_deleted(
        pool: &PgPool,
        alias_address: &str,
    ) -> Result<Option<AliasRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM aliases WHERE alias_address = $1");
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(alias_address)
            .fetch_optional(pool)
            .await
    }

    /// List a user's live aliases in insertion order.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<AliasRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM aliases
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite email reference, address and `updated_at` of a live alias.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(pool: &PgPool, alias: &Alias) -> Result<Option<AliasRow>, sqlx::Error> {
        let query = format!(
            "UPDATE aliases SET
                email_id = $2,
                alias_address = $3,
                updated_at = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AliasRow>(&query)
            .bind(&alias.id)
            .bind(&alias.email_id)
            .bind(&alias.alias_address)
            .bind(alias.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an alias by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE aliases SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
