//! PostgreSQL user store implementation

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::domain::user::{Balance, User, UserId, UserRepository, UserStoreError};
use crate::infrastructure::storage::{classify_error, is_unique_violation};

/// PostgreSQL implementation of UserRepository
///
/// Relies on the primary key of `users.id` for uniqueness. Every call is
/// bounded by `operation_timeout` and reported as `Unavailable` once it
/// runs out.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
    operation_timeout: Duration,
}

impl PostgresUserStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the users table if it doesn't exist
    pub async fn ensure_schema(&self) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGINT PRIMARY KEY,
                balance BIGINT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(classify_error)?;

        Ok(())
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, UserStoreError>
    where
        F: Future<Output = Result<T, UserStoreError>>,
    {
        tokio::time::timeout(self.operation_timeout, operation)
            .await
            .map_err(|_| {
                UserStoreError::unavailable(format!(
                    "Operation timed out after {}ms",
                    self.operation_timeout.as_millis()
                ))
            })?
    }

    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let id = user.id();
        let mut tx = self.pool.begin().await.map_err(classify_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, balance)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id.value())
        .bind(user.balance().amount())
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_write(id, e))?;

        // Dropping the transaction here rolls it back
        if result.rows_affected() == 0 {
            return Err(UserStoreError::duplicate_key(id));
        }

        tx.commit().await.map_err(|e| classify_write(id, e))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserStore {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        debug!(user_id = %user.id(), "Inserting user");
        self.bounded(self.insert(user)).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let row = self
            .bounded(async {
                sqlx::query("SELECT id, balance FROM users WHERE id = $1")
                    .bind(id.value())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(classify_error)
            })
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        self.bounded(async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(classify_error)
        })
        .await?;

        Ok(())
    }
}

fn classify_write(id: UserId, err: sqlx::Error) -> UserStoreError {
    if is_unique_violation(&err) {
        UserStoreError::duplicate_key(id)
    } else {
        classify_error(err)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, UserStoreError> {
    let id: i64 = row.try_get("id").map_err(classify_error)?;
    let balance: i64 = row.try_get("balance").map_err(classify_error)?;

    let balance = Balance::new(balance)
        .map_err(|e| UserStoreError::storage(format!("Invalid balance in database: {}", e)))?;

    Ok(User::new(UserId::new(id), balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy_store(operation_timeout: Duration) -> PostgresUserStore {
        let pool = PgPool::connect_lazy("postgres://user_traits@localhost/user_traits").unwrap();
        PostgresUserStore::new(pool, operation_timeout)
    }

    #[tokio::test]
    async fn test_bounded_reports_timeout_as_unavailable() {
        let store = lazy_store(Duration::from_millis(20));

        let result = store
            .bounded(std::future::pending::<Result<(), UserStoreError>>())
            .await;

        match result {
            Err(UserStoreError::Unavailable { message, .. }) => {
                assert_eq!(message, "Operation timed out after 20ms");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bounded_passes_through_inner_result() {
        let store = lazy_store(Duration::from_secs(1));

        let ok = store.bounded(async { Ok::<_, UserStoreError>(7) }).await;
        assert_eq!(ok, Ok(7));

        let dup = store
            .bounded(async { Err::<(), _>(UserStoreError::duplicate_key(UserId::new(1))) })
            .await;
        assert_eq!(dup, Err(UserStoreError::duplicate_key(UserId::new(1))));
    }
}
