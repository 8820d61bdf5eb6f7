//! Postgres-backed implementation of the `aliasly_core::store` traits.

use aliasly_core::models::{Alias, Email, User};
use aliasly_core::store::{AliasStore, EmailStore, Store, StoreError, UserStore};
use async_trait::async_trait;

use crate::repositories::{AliasRepo, EmailRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Store handle over a shared connection pool. Cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error: unique violations become [`StoreError::Conflict`],
/// everything else is a backend failure.
pub fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::Conflict { constraint };
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &User) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, user)
            .await
            .map(User::from)
            .map_err(classify_sqlx_error)
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(User::from))
            .map_err(classify_sqlx_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map(|row| row.map(User::from))
            .map_err(classify_sqlx_error)
    }

    async fn update_user(&self, user: &User) -> Result<Option<User>, StoreError> {
        UserRepo::update(&self.pool, user)
            .await
            .map(|row| row.map(User::from))
            .map_err(classify_sqlx_error)
    }

    async fn soft_delete_user(&self, id: &str) -> Result<bool, StoreError> {
        UserRepo::soft_delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl EmailStore for PgStore {
    async fn create_email(&self, email: &Email) -> Result<Email, StoreError> {
        EmailRepo::create(&self.pool, email)
            .await
            .map(Email::from)
            .map_err(classify_sqlx_error)
    }

    async fn find_pending_email_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Email>, StoreError> {
        EmailRepo::find_pending_by_token(&self.pool, token)
            .await
            .map(|row| row.map(Email::from))
            .map_err(classify_sqlx_error)
    }

    async fn find_verified_email(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Email>, StoreError> {
        EmailRepo::find_verified(&self.pool, id, user_id)
            .await
            .map(|row| row.map(Email::from))
            .map_err(classify_sqlx_error)
    }

    async fn update_email(&self, email: &Email) -> Result<Option<Email>, StoreError> {
        EmailRepo::update(&self.pool, email)
            .await
            .map(|row| row.map(Email::from))
            .map_err(classify_sqlx_error)
    }

    async fn soft_delete_email(&self, id: &str) -> Result<bool, StoreError> {
        EmailRepo::soft_delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn list_emails_for_user(&self, user_id: &str) -> Result<Vec<Email>, StoreError> {
        EmailRepo::list_by_user(&self.pool, user_id)
            .await
            .map(|rows| rows.into_iter().map(Email::from).collect())
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl AliasStore for PgStore {
    async fn create_alias(&self, alias: &Alias) -> Result<Alias, StoreError> {
        AliasRepo::create(&self.pool, alias)
            .await
            .map(Alias::from)
            .map_err(classify_sqlx_error)
    }

    async fn find_alias_by_id(&self, id: &str) -> Result<Option<Alias>, StoreError> {
        AliasRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Alias::from))
            .map_err(classify_sqlx_error)
    }

    async fn find_alias_by_id_include_deleted(
        &self,
        id: &str,
    ) -> Result<Option<Alias>, StoreError> {
        AliasRepo::find_by_id_include_deleted(&self.pool, id)
            .await
            .map(|row| row.map(Alias::from))
            .map_err(classify_sqlx_error)
    }

    async fn find_alias_by_address_include_deleted(
        &self,
        alias_address: &str,
    ) -> Result<Option<Alias>, StoreError> {
        AliasRepo::find_by_address_include_deleted(&self.pool, alias_address)
            .await
            .map(|row| row.map(Alias::from))
            .map_err(classify_sqlx_error)
    }

    async fn update_alias(&self, alias: &Alias) -> Result<Option<Alias>, StoreError> {
        AliasRepo::update(&self.pool, alias)
            .await
            .map(|row| row.map(Alias::from))
            .map_err(classify_sqlx_error)
    }

    async fn soft_delete_alias(&self, id: &str) -> Result<bool, StoreError> {
        AliasRepo::soft_delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn list_aliases_for_user(&self, user_id: &str) -> Result<Vec<Alias>, StoreError> {
        AliasRepo::list_by_user(&self.pool, user_id)
            .await
            .map(|rows| rows.into_iter().map(Alias::from).collect())
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_a_backend_error() {
        let err = classify_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
