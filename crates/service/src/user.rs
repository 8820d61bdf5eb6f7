//! User workflow: registration, profile updates, soft deletion and lookup.

use std::sync::Arc;

use aliasly_core::error::CoreError;
use aliasly_core::ids::new_entity_id;
use aliasly_core::models::User;
use aliasly_core::store::Store;
use aliasly_core::types::EntityId;
use chrono::Utc;

use crate::messages::{CreateUserRequest, UpdateUserRequest};
use crate::password::hash_password;
use crate::validate_request;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a user. The password is stored only as an Argon2id hash.
    ///
    /// Fails with [`CoreError::Conflict`] if the username or email is taken.
    pub async fn create_user(&self, input: CreateUserRequest) -> Result<User, CoreError> {
        validate_request(&input)?;

        let CreateUserRequest {
            username,
            email,
            password,
        } = input;

        // Hash on the blocking pool.
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        let now = Utc::now();
        let user = User {
            id: new_entity_id(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let user = self.store.create_user(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, CoreError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("User", id))
    }

    /// Apply profile changes. Concurrent updates are last-write-wins.
    pub async fn update_user(
        &self,
        id: &str,
        input: UpdateUserRequest,
    ) -> Result<User, CoreError> {
        validate_request(&input)?;

        let mut user = self.get_user(id).await?;
        if let Some(username) = input.username {
            user.username = username;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        let user = self
            .store
            .update_user(&user)
            .await?
            .ok_or_else(|| CoreError::not_found("User", id))?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Soft-delete a user. The row stays in storage.
    pub async fn delete_user(&self, id: &str) -> Result<(), CoreError> {
        if !self.store.soft_delete_user(id).await? {
            return Err(CoreError::not_found("User", id));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Resolve the ID of the live user registered with `email`.
    pub async fn get_user_by_email(&self, email: &str) -> Result<EntityId, CoreError> {
        if email.trim().is_empty() {
            return Err(CoreError::Validation("email must not be empty".to_string()));
        }

        match self.store.find_user_by_email(email).await {
            Ok(Some(user)) => Ok(user.id),
            Ok(None) => Err(CoreError::NotFound {
                entity: "User",
                key: format!("email {email}"),
            }),
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up user by email");
                Err(CoreError::Internal("failed to get user".to_string()))
            }
        }
    }
}
