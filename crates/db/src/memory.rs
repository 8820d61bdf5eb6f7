//! In-process store with the same visibility and constraint rules as the
//! Postgres schema.
//!
//! Rows live in insertion-ordered vectors behind a single lock, so the
//! uniqueness check and the insert are atomic: of two racing inserts on the
//! same unique key exactly one wins. Soft-deleted rows are kept and still
//! take part in uniqueness checks.

use std::sync::atomic::{AtomicBool, Ordering};

use aliasly_core::models::{Alias, Email, User};
use aliasly_core::store::{
    constraints, AliasStore, EmailStore, Store, StoreError, UserStore,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    emails: Vec<Email>,
    aliases: Vec<Alias>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_alias_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent alias insert fail with [`StoreError::Backend`],
    /// simulating a storage outage after the provider call.
    pub fn fail_alias_inserts(&self, fail: bool) {
        self.fail_alias_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of alias rows physically stored, tombstoned ones included.
    pub async fn alias_row_count(&self) -> usize {
        self.tables.read().await.aliases.len()
    }
}

fn conflict(constraint: &str) -> StoreError {
    StoreError::Conflict {
        constraint: constraint.to_string(),
    }
}

/// Check a user's unique columns against every other row.
fn check_user_unique(users: &[User], candidate: &User) -> Result<(), StoreError> {
    for other in users.iter().filter(|u| u.id != candidate.id) {
        if other.username == candidate.username {
            return Err(conflict(constraints::USERS_USERNAME));
        }
        if other.email == candidate.email {
            return Err(conflict(constraints::USERS_EMAIL));
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.id == user.id) {
            return Err(conflict("users_pkey"));
        }
        check_user_unique(&tables.users, user)?;
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn update_user(&self, user: &User) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        check_user_unique(&tables.users, user)?;
        let Some(row) = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id && u.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.username = user.username.clone();
        row.email = user.email.clone();
        row.updated_at = user.updated_at;
        Ok(Some(row.clone()))
    }

    async fn soft_delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables
            .users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl EmailStore for MemoryStore {
    async fn create_email(&self, email: &Email) -> Result<Email, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.emails.iter().any(|e| e.id == email.id) {
            return Err(conflict("emails_pkey"));
        }
        if tables.emails.iter().any(|e| e.address == email.address) {
            return Err(conflict(constraints::EMAILS_ADDRESS));
        }
        tables.emails.push(email.clone());
        Ok(email.clone())
    }

    async fn find_pending_email_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Email>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .iter()
            .find(|e| {
                !e.verified && e.deleted_at.is_none() && e.token.as_deref() == Some(token)
            })
            .cloned())
    }

    async fn find_verified_email(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Email>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .iter()
            .find(|e| e.id == id && e.user_id == user_id && e.verified && e.deleted_at.is_none())
            .cloned())
    }

    async fn update_email(&self, email: &Email) -> Result<Option<Email>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .emails
            .iter()
            .any(|e| e.id != email.id && e.address == email.address)
        {
            return Err(conflict(constraints::EMAILS_ADDRESS));
        }
        let Some(row) = tables
            .emails
            .iter_mut()
            .find(|e| e.id == email.id && e.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.address = email.address.clone();
        row.verified = email.verified;
        row.token = email.token.clone();
        row.updated_at = email.updated_at;
        Ok(Some(row.clone()))
    }

    async fn soft_delete_email(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables
            .emails
            .iter_mut()
            .find(|e| e.id == id && e.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_emails_for_user(&self, user_id: &str) -> Result<Vec<Email>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .iter()
            .filter(|e| e.user_id == user_id && e.deleted_at.is_none())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AliasStore for MemoryStore {
    async fn create_alias(&self, alias: &Alias) -> Result<Alias, StoreError> {
        if self.fail_alias_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated outage".to_string()));
        }
        let mut tables = self.tables.write().await;
        if tables.aliases.iter().any(|a| a.id == alias.id) {
            return Err(conflict("aliases_pkey"));
        }
        if tables
            .aliases
            .iter()
            .any(|a| a.alias_address == alias.alias_address)
        {
            return Err(conflict(constraints::ALIASES_ALIAS_ADDRESS));
        }
        tables.aliases.push(alias.clone());
        Ok(alias.clone())
    }

    async fn find_alias_by_id(&self, id: &str) -> Result<Option<Alias>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .aliases
            .iter()
            .find(|a| a.id == id && a.deleted_at.is_none())
            .cloned())
    }

    async fn find_alias_by_id_include_deleted(
        &self,
        id: &str,
    ) -> Result<Option<Alias>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.aliases.iter().find(|a| a.id == id).cloned())
    }

    async fn find_alias_by_address_include_deleted(
        &self,
        alias_address: &str,
    ) -> Result<Option<Alias>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .aliases
            .iter()
            .find(|a| a.alias_address == alias_address)
            .cloned())
    }

    async fn update_alias(&self, alias: &Alias) -> Result<Option<Alias>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .aliases
            .iter()
            .any(|a| a.id != alias.id && a.alias_address == alias.alias_address)
        {
            return Err(conflict(constraints::ALIASES_ALIAS_ADDRESS));
        }
        let Some(row) = tables
            .aliases
            .iter_mut()
            .find(|a| a.id == alias.id && a.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.email_id = alias.email_id.clone();
        row.alias_address = alias.alias_address.clone();
        row.updated_at = alias.updated_at;
        Ok(Some(row.clone()))
    }

    async fn soft_delete_alias(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables
            .aliases
            .iter_mut()
            .find(|a| a.id == id && a.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_aliases_for_user(&self, user_id: &str) -> Result<Vec<Alias>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .aliases
            .iter()
            .filter(|a| a.user_id == user_id && a.deleted_at.is_none())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
