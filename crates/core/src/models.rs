//! Domain entities.
//!
//! Every entity carries a `deleted_at` tombstone. A row with `deleted_at`
//! set is invisible to business lookups but stays in storage.

use serde::Serialize;

use crate::types::{EntityId, Timestamp};

/// A registered account.
///
/// Holds the Argon2id password hash -- NEVER serialize this directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Safe user representation (no password hash, no tombstone).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// An address a user claims to own.
///
/// `token` is `Some` exactly while `verified` is `false`. Once verified the
/// token is cleared and the email never returns to the pending state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub id: EntityId,
    pub user_id: EntityId,
    pub address: String,
    pub verified: bool,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}

impl Email {
    /// A fresh, unverified email carrying `token`.
    pub fn pending(
        id: EntityId,
        user_id: EntityId,
        address: String,
        token: String,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            address,
            verified: false,
            token: Some(token),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Transition to verified: set the flag and drop the token.
    pub fn mark_verified(&mut self, now: Timestamp) {
        self.verified = true;
        self.token = None;
        self.updated_at = now;
    }
}

/// A forwarding address routed to a verified [`Email`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub id: EntityId,
    pub user_id: EntityId,
    pub email_id: EntityId,
    pub alias_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}
