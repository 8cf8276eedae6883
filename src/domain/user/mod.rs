//! User domain
//!
//! This module provides domain types and traits for user records,
//! including the user entity, validation, and the store abstraction.

mod entity;
mod error;
mod repository;
mod validation;

pub use entity::{Balance, User, UserId};
pub use error::UserStoreError;
pub use repository::UserRepository;
pub use validation::{validate_balance, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
