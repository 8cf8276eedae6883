//! Storage infrastructure - database connectivity

mod postgres;

pub use postgres::{classify_error, connect_pool, is_unique_violation, PostgresConfig};
