use agency_cms::domain::repositories::TokenRepository;
use agency_cms::error::AppError;
use agency_cms::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token("test-token", "hash123").await.unwrap();

    assert_eq!(token.name, "test-token");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_validate_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("valid-token", "validhash").await.unwrap();

    assert!(repo.validate_token("validhash").await.unwrap());
    assert!(!repo.validate_token("nonexistent").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_validate_token_revoked(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("revoked-token", "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert!(!repo.validate_token("revokedhash").await.unwrap());

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.revoked_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_update_last_used(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("update-token", "updatehash")
        .await
        .unwrap();

    repo.update_last_used("updatehash").await.unwrap();

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_and_find_tokens(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("token1", "hash1").await.unwrap();
    repo.create_token("token2", "hash2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 2);

    let by_name = repo.find_by_name("token2").await.unwrap().unwrap();
    assert_eq!(by_name.token_hash, "hash2");

    assert!(repo.find_by_name("missing").await.unwrap().is_none());
    assert!(repo.find_by_id(9_999).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_revoke_twice_is_not_found(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("double-revoke", "doublehash")
        .await
        .unwrap();

    repo.revoke_token(token.id).await.unwrap();
    let result = repo.revoke_token(token.id).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_hash_is_conflict(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("first", "samehash").await.unwrap();
    let result = repo.create_token("second", "samehash").await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
