//! Integration tests for the Postgres repositories.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`
//! and applies `db/migrations`.

use aliasly_core::ids::{new_entity_id, new_verification_token};
use aliasly_core::models::{Alias, Email, User};
use aliasly_core::store::{constraints, AliasStore, EmailStore, StoreError, UserStore};
use aliasly_db::PgStore;
use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;

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

fn new_alias(user_id: &str, email_id: &str, address: &str, age_secs: i64) -> Alias {
    let at = Utc::now() - Duration::seconds(age_secs);
    Alias {
        id: new_entity_id(),
        user_id: user_id.to_string(),
        email_id: email_id.to_string(),
        alias_address: address.to_string(),
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

fn ids<T>(rows: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|r| id(r).to_string()).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_username_maps_to_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_user(&new_user("alice", "a@x.com")).await.unwrap();

    let err = store
        .create_user(&new_user("alice", "b@x.com"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict { constraint } if constraint == constraints::USERS_USERNAME);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verify_clears_token(pool: PgPool) {
    let store = PgStore::new(pool);
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
        .unwrap();
    found.mark_verified(Utc::now());
    let saved = store.update_email(&found).await.unwrap().unwrap();

    assert!(saved.verified);
    assert!(saved.token.is_none());
    assert!(store.find_pending_email_by_token(&token).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_alias_kept_and_hidden(pool: PgPool) {
    let store = PgStore::new(pool);
    let now = Utc::now();
    let alias = store
        .create_alias(&Alias {
            id: new_entity_id(),
            user_id: "u1".to_string(),
            email_id: "e1".to_string(),
            alias_address: "sales@d.org".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
        .await
        .unwrap();

    assert!(store.soft_delete_alias(&alias.id).await.unwrap());
    assert!(store.list_aliases_for_user("u1").await.unwrap().is_empty());
    assert!(store
        .find_alias_by_id_include_deleted(&alias.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_list_is_oldest_first_and_skips_deleted(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut created = Vec::new();
    for (address, age) in [("old@x.com", 30), ("mid@x.com", 20), ("new@x.com", 10)] {
        let email = Email::pending(
            new_entity_id(),
            "u1".to_string(),
            address.to_string(),
            new_verification_token(),
            Utc::now() - Duration::seconds(age),
        );
        created.push(store.create_email(&email).await.unwrap());
    }
    store
        .create_email(&Email::pending(
            new_entity_id(),
            "u2".to_string(),
            "other@x.com".to_string(),
            new_verification_token(),
            Utc::now(),
        ))
        .await
        .unwrap();

    assert!(store.soft_delete_email(&created[1].id).await.unwrap());

    let listed = store.list_emails_for_user("u1").await.unwrap();
    assert_eq!(
        ids(&listed, |e| e.id.as_str()),
        vec![created[0].id.clone(), created[2].id.clone()]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_update_on_deleted_row_is_none(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut email = store
        .create_email(&Email::pending(
            new_entity_id(),
            "u1".to_string(),
            "a@x.com".to_string(),
            new_verification_token(),
            Utc::now(),
        ))
        .await
        .unwrap();
    assert!(store.soft_delete_email(&email.id).await.unwrap());

    email.mark_verified(Utc::now());
    assert!(store.update_email(&email).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alias_update_rewrites_address_and_email(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut alias = store
        .create_alias(&new_alias("u1", "e1", "old@d.org", 0))
        .await
        .unwrap();

    alias.email_id = "e2".to_string();
    alias.alias_address = "new@d.org".to_string();
    alias.updated_at = Utc::now();
    let saved = store.update_alias(&alias).await.unwrap().unwrap();

    assert_eq!(saved.email_id, "e2");
    assert_eq!(saved.alias_address, "new@d.org");
    assert!(store
        .find_alias_by_address_include_deleted("old@d.org")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alias_update_onto_deleted_address_conflicts(pool: PgPool) {
    let store = PgStore::new(pool);
    let taken = store
        .create_alias(&new_alias("u1", "e1", "taken@d.org", 0))
        .await
        .unwrap();
    assert!(store.soft_delete_alias(&taken.id).await.unwrap());
    let mut alias = store
        .create_alias(&new_alias("u2", "e2", "free@d.org", 0))
        .await
        .unwrap();

    alias.alias_address = "taken@d.org".to_string();
    let err = store.update_alias(&alias).await.unwrap_err();

    assert_matches!(
        err,
        StoreError::Conflict { constraint } if constraint == constraints::ALIASES_ALIAS_ADDRESS
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alias_list_is_oldest_first_per_user(pool: PgPool) {
    let store = PgStore::new(pool);
    let newer = store
        .create_alias(&new_alias("u1", "e1", "b@d.org", 5))
        .await
        .unwrap();
    let older = store
        .create_alias(&new_alias("u1", "e1", "a@d.org", 50))
        .await
        .unwrap();
    store
        .create_alias(&new_alias("u2", "e2", "c@d.org", 1))
        .await
        .unwrap();

    let listed = store.list_aliases_for_user("u1").await.unwrap();
    assert_eq!(ids(&listed, |a| a.id.as_str()), vec![older.id, newer.id]);
}
