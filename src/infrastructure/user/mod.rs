//! User infrastructure module
//!
//! This module provides the user store backends (PostgreSQL and in-memory)
//! and the user service that sits in front of them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserStore;
pub use repository::InMemoryUserStore;
pub use service::{CreateUserRequest, UserService};
