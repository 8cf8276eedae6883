//! PostgreSQL user store tests
//!
//! Run against a disposable database by setting `TEST_DATABASE_URL`;
//! without it every test returns early.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use user_traits::domain::{Balance, User, UserId, UserRepository, UserStoreError};
use user_traits::infrastructure::storage::{connect_pool, PostgresConfig};
use user_traits::infrastructure::user::PostgresUserStore;

async fn store() -> Option<PostgresUserStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = connect_pool(&PostgresConfig::new(url).with_max_connections(20))
        .await
        .unwrap();

    let store = PostgresUserStore::new(pool, Duration::from_secs(5));
    store.ensure_schema().await.unwrap();
    Some(store)
}

async fn reset(store: &PostgresUserStore, ids: &[i64]) {
    sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(ids)
        .execute(store.pool())
        .await
        .unwrap();
}

fn user(id: i64, balance: i64) -> User {
    User::new(UserId::new(id), Balance::new(balance).unwrap())
}

#[tokio::test]
async fn create_then_read_back() {
    let Some(store) = store().await else { return };
    reset(&store, &[910_001]).await;

    store.create(&user(910_001, 1000)).await.unwrap();

    let stored = store.get(UserId::new(910_001)).await.unwrap();
    assert_eq!(stored, Some(user(910_001, 1000)));
}

#[tokio::test]
async fn duplicate_does_not_overwrite() {
    let Some(store) = store().await else { return };
    reset(&store, &[910_002]).await;

    sqlx::query("INSERT INTO users VALUES ($1, $2)")
        .bind(910_002_i64)
        .bind(100_i64)
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.create(&user(910_002, 500)).await;
    assert_eq!(
        result,
        Err(UserStoreError::duplicate_key(UserId::new(910_002)))
    );

    let stored = store.get(UserId::new(910_002)).await.unwrap().unwrap();
    assert_eq!(stored.balance().amount(), 100);
}

#[tokio::test]
async fn concurrent_creates_single_winner() {
    let Some(store) = store().await else { return };
    reset(&store, &[910_003]).await;
    let store = Arc::new(store);

    let attempts = (0..16).map(|_| {
        let store = store.clone();
        tokio::spawn(async move { store.create(&user(910_003, 10)).await })
    });

    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(r, Err(UserStoreError::DuplicateKey { .. }))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(910_003_i64)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn closed_pool_is_unavailable() {
    let Some(store) = store().await else { return };
    store.pool().close().await;

    let result = store.create(&user(910_004, 1)).await;
    assert!(matches!(result, Err(UserStoreError::Unavailable { .. })));
}

#[tokio::test]
async fn ping_reachable_database() {
    let Some(store) = store().await else { return };
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn blocked_write_times_out_as_unavailable() {
    let Some(store) = store().await else { return };
    reset(&store, &[910_005]).await;

    // An uncommitted insert of the same id makes the next insert wait on the key
    let mut holder = store.pool().begin().await.unwrap();
    sqlx::query("INSERT INTO users VALUES ($1, $2)")
        .bind(910_005_i64)
        .bind(1_i64)
        .execute(&mut *holder)
        .await
        .unwrap();

    let impatient = PostgresUserStore::new(store.pool().clone(), Duration::from_millis(200));
    let result = impatient.create(&user(910_005, 2)).await;

    holder.rollback().await.unwrap();

    match result {
        Err(UserStoreError::Unavailable { message, .. }) => {
            assert!(message.contains("timed out"), "message: {}", message);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(store.get(UserId::new(910_005)).await.unwrap(), None);
}
