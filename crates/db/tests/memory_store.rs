//! Tests for `MemoryStore` visibility and constraint semantics.
//!
//! These mirror the guarantees of the Postgres schema so workflow and API
//! tests running on the in-memory store exercise the same rules.

use std::sync::Arc;

use aliasly_core::ids::{new_entity_id, new_verification_token};
use aliasly_core::models::{Alias, Email, User};
use aliasly_core::store::{constraints, AliasStore, EmailStore, StoreError, UserStore};
use aliasly_db::MemoryStore;
use assert_matches::assert_matches;
use chrono::Utc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: new_entity_id(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn new_alias(user_id: &str, email_id: &str, address: &str) -> Alias {
    let now = Utc::now();
    Alias {
        id: new_entity_id(),
        user_id: user_id.to_string(),
        email_id: email_id.to_string(),
        alias_address: address.to_string(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let store = MemoryStore::new();
    store.create_user(&new_user("alice", "a@x.com")).await.unwrap();

    let err = store
        .create_user(&new_user("alice", "other@x.com"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict { constraint } if constraint == constraints::USERS_USERNAME);
}

#[tokio::test]
async fn soft_deleted_user_is_hidden_but_still_blocks_its_username() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("bob", "b@x.com")).await.unwrap();

    assert!(store.soft_delete_user(&user.id).await.unwrap());
    assert!(store.find_user_by_id(&user.id).await.unwrap().is_none());
    assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());

    // Second delete finds nothing live.
    assert!(!store.soft_delete_user(&user.id).await.unwrap());

    let err = store
        .create_user(&new_user("bob", "new@x.com"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict { .. });
}

#[tokio::test]
async fn update_user_rejects_taken_email() {
    let store = MemoryStore::new();
    store.create_user(&new_user("carol", "c@x.com")).await.unwrap();
    let mut dave = store.create_user(&new_user("dave", "d@x.com")).await.unwrap();

    dave.email = "c@x.com".to_string();
    let err = store.update_user(&dave).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict { constraint } if constraint == constraints::USERS_EMAIL);
}

#[tokio::test]
async fn concurrent_inserts_on_same_username_have_one_winner() {
    let store = Arc::new(MemoryStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create_user(&new_user("racer", &format!("r{i}@x.com")))
                    .await
            })
        })
        .collect();

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(StoreError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);
}

// ---------------------------------------------------------------------------
// Emails
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pending_email_is_found_by_token_until_verified() {
    let store = MemoryStore::new();
    let token = new_verification_token();
    let email = Email::pending(
        new_entity_id(),
        "u1".to_string(),
        "a@x.com".to_string(),
        token.clone(),
        Utc::now(),
    );
    store.create_email(&email).await.unwrap();

    let mut found = store
        .find_pending_email_by_token(&token)
        .await
        .unwrap()
        .expect("pending email should be found");
    assert!(store
        .find_verified_email(&found.id, "u1")
        .await
        .unwrap()
        .is_none());

    found.mark_verified(Utc::now());
    store.update_email(&found).await.unwrap().unwrap();

    assert!(store.find_pending_email_by_token(&token).await.unwrap().is_none());
    assert!(store
        .find_verified_email(&found.id, "u1")
        .await
        .unwrap()
        .is_some());
    // Wrong owner never matches.
    assert!(store
        .find_verified_email(&found.id, "u2")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn soft_deleted_alias_leaves_listing_but_keeps_row() {
    let store = MemoryStore::new();
    let kept = store
        .create_alias(&new_alias("u1", "e1", "keep@d.org"))
        .await
        .unwrap();
    let gone = store
        .create_alias(&new_alias("u1", "e1", "gone@d.org"))
        .await
        .unwrap();

    assert!(store.soft_delete_alias(&gone.id).await.unwrap());

    let listed = store.list_aliases_for_user("u1").await.unwrap();
    assert_eq!(listed, vec![kept]);
    assert!(store.find_alias_by_id(&gone.id).await.unwrap().is_none());

    let tombstone = store
        .find_alias_by_id_include_deleted(&gone.id)
        .await
        .unwrap()
        .expect("row must still be stored");
    assert!(tombstone.deleted_at.is_some());
    assert_eq!(store.alias_row_count().await, 2);
}

#[tokio::test]
async fn deleted_alias_address_cannot_be_reused() {
    let store = MemoryStore::new();
    let alias = store
        .create_alias(&new_alias("u1", "e1", "sales@d.org"))
        .await
        .unwrap();
    store.soft_delete_alias(&alias.id).await.unwrap();

    let err = store
        .create_alias(&new_alias("u2", "e2", "sales@d.org"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict { constraint } if constraint == constraints::ALIASES_ALIAS_ADDRESS);
}

#[tokio::test]
async fn simulated_outage_fails_alias_insert() {
    let store = MemoryStore::new();
    store.fail_alias_inserts(true);
    let err = store
        .create_alias(&new_alias("u1", "e1", "x@d.org"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Backend(_));
    assert_eq!(store.alias_row_count().await, 0);
}
