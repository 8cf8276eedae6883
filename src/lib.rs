//! User traits service
//!
//! Tracks user records (an id and a balance) in a relational store and
//! exposes an HTTP endpoint that creates each user exactly once:
//! - Uniqueness enforced by the store in a single atomic insert
//! - Duplicate ids reported as a `409 user_exists` conflict
//! - Store failures reported as retryable server errors

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use api::state::AppState;
use config::{StorageBackend, StorageConfig};
use infrastructure::storage::{connect_pool, PostgresConfig};
use infrastructure::user::{InMemoryUserStore, PostgresUserStore};

/// Application state plus the resources that must be released on shutdown
pub struct AppContext {
    pub state: AppState,
    pub pool: Option<PgPool>,
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppContext> {
    info!(backend = ?config.storage.backend, "Configuring user store");

    match config.storage.backend {
        StorageBackend::Postgres => {
            let store = create_postgres_store(&config.storage).await?;
            let pool = store.pool().clone();

            Ok(AppContext {
                state: AppState::with_repository(Arc::new(store)),
                pool: Some(pool),
            })
        }
        StorageBackend::Memory => Ok(AppContext {
            state: AppState::with_repository(Arc::new(InMemoryUserStore::new())),
            pool: None,
        }),
    }
}

async fn create_postgres_store(config: &StorageConfig) -> anyhow::Result<PostgresUserStore> {
    info!("Connecting to PostgreSQL...");
    let pool = connect_pool(&PostgresConfig::from(config)).await?;
    info!("PostgreSQL connection established");

    let store = PostgresUserStore::new(pool, config.operation_timeout());

    if config.ensure_schema {
        store.ensure_schema().await?;
        info!("Users table ensured");
    }

    Ok(store)
}
