mod common;

use link_analytics::domain::entities::OwnerId;
use link_analytics::domain::repositories::{OwnerRepository, TokenRepository};
use link_analytics::error::AppError;
use link_analytics::infrastructure::persistence::{PgOwnerRepository, PgTokenRepository};
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_and_resolve_token(pool: PgPool) {
    let owner = common::create_pg_owner(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(owner, "ci", "hash-1").await.unwrap();

    assert_eq!(token.name, "ci");
    assert_eq!(token.owner_id, owner);
    assert!(token.revoked_at.is_none());
    assert_eq!(repo.find_owner("hash-1").await.unwrap(), Some(owner));
    assert_eq!(repo.find_owner("unknown").await.unwrap(), None);
}

#[sqlx::test]
async fn test_revoked_token_does_not_resolve(pool: PgPool) {
    let owner = common::create_pg_owner(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    let token = repo.create_token(owner, "ci", "hash-1").await.unwrap();

    repo.revoke_token(token.id).await.unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_owner("hash-1").await.unwrap(), None);
    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.revoked_at.is_some());
}

#[sqlx::test]
async fn test_duplicate_token_name_conflicts(pool: PgPool) {
    let owner = common::create_pg_owner(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(owner, "ci", "hash-1").await.unwrap();

    let result = repo.create_token(owner, "ci", "hash-2").await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_token_for_unknown_owner(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let result = repo.create_token(OwnerId(777), "ci", "hash-1").await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_list_and_find_by_name(pool: PgPool) {
    let owner = common::create_pg_owner(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(owner, "first", "hash-1").await.unwrap();
    repo.create_token(owner, "second", "hash-2").await.unwrap();

    assert_eq!(repo.list_tokens().await.unwrap().len(), 2);
    assert_eq!(
        repo.find_by_name("second").await.unwrap().unwrap().token_hash,
        "hash-2"
    );
    assert!(repo.find_by_name("third").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let owner = common::create_pg_owner(&pool, "alice").await;
    let pool = Arc::new(pool);
    let repo = PgTokenRepository::new(pool.clone());
    repo.create_token(owner, "ci", "hash-1").await.unwrap();

    repo.update_last_used("hash-1").await.unwrap();

    let last_used: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT last_used_at FROM api_tokens WHERE token_hash = $1")
            .bind("hash-1")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
    assert!(last_used.is_some());
}

#[sqlx::test]
async fn test_owner_repository(pool: PgPool) {
    let repo = PgOwnerRepository::new(Arc::new(pool));

    let alice = repo.create("alice").await.unwrap();
    let bob = repo.create("bob").await.unwrap();

    assert!(matches!(repo.create("alice").await, Err(AppError::Conflict { .. })));
    assert_eq!(repo.find_by_id(alice.id).await.unwrap().unwrap().name, "alice");
    assert!(repo.find_by_id(OwnerId(0)).await.unwrap().is_none());

    let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|o| o.name).collect();
    assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
    assert_ne!(alice.id, bob.id);
}
