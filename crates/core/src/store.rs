//! Repository contract.
//!
//! Lookups return `Ok(None)` (or `Ok(false)` for soft-delete) when no live
//! row matches; the workflows turn that into [`crate::error::CoreError::NotFound`].
//! Every read filters out soft-deleted rows unless its name says
//! `include_deleted`. Unique constraints span soft-deleted rows, so a
//! deleted alias address cannot be reused.

use async_trait::async_trait;

use crate::models::{Alias, Email, User};

/// Storage-level failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field collided with an existing row.
    #[error("unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    /// Any other storage failure (connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Unique constraint names shared by every store implementation.
pub mod constraints {
    pub const USERS_USERNAME: &str = "uq_users_username";
    pub const USERS_EMAIL: &str = "uq_users_email";
    pub const EMAILS_ADDRESS: &str = "uq_emails_address";
    pub const ALIASES_ALIAS_ADDRESS: &str = "uq_aliases_alias_address";
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Overwrite a live user's mutable fields. `None` if no live row has this ID.
    async fn update_user(&self, user: &User) -> Result<Option<User>, StoreError>;

    async fn soft_delete_user(&self, id: &str) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait EmailStore: Send + Sync {
    async fn create_email(&self, email: &Email) -> Result<Email, StoreError>;

    /// Find the unverified email whose token matches exactly.
    async fn find_pending_email_by_token(&self, token: &str)
        -> Result<Option<Email>, StoreError>;

    /// Find an email only if it has this ID, belongs to `user_id` and is verified.
    async fn find_verified_email(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Email>, StoreError>;

    async fn update_email(&self, email: &Email) -> Result<Option<Email>, StoreError>;

    async fn soft_delete_email(&self, id: &str) -> Result<bool, StoreError>;

    /// Live emails of a user, oldest first.
    async fn list_emails_for_user(&self, user_id: &str) -> Result<Vec<Email>, StoreError>;
}

#[async_trait]
pub trait AliasStore: Send + Sync {
    async fn create_alias(&self, alias: &Alias) -> Result<Alias, StoreError>;

    async fn find_alias_by_id(&self, id: &str) -> Result<Option<Alias>, StoreError>;

    /// Like [`AliasStore::find_alias_by_id`] but also returns tombstoned rows.
    async fn find_alias_by_id_include_deleted(
        &self,
        id: &str,
    ) -> Result<Option<Alias>, StoreError>;

    /// Any alias (live or tombstoned) holding `alias_address`.
    async fn find_alias_by_address_include_deleted(
        &self,
        alias_address: &str,
    ) -> Result<Option<Alias>, StoreError>;

    async fn update_alias(&self, alias: &Alias) -> Result<Option<Alias>, StoreError>;

    async fn soft_delete_alias(&self, id: &str) -> Result<bool, StoreError>;

    /// Live aliases of a user, oldest first.
    async fn list_aliases_for_user(&self, user_id: &str) -> Result<Vec<Alias>, StoreError>;
}

/// Full repository handle shared by the workflows.
#[async_trait]
pub trait Store: UserStore + EmailStore + AliasStore {
    /// Cheap round trip proving the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
