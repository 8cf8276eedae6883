//! User service for creating user records

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::user::{Balance, User, UserId, UserRepository, UserStoreError};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub id: i64,
    pub balance: i64,
}

/// User service: validates input and performs a single store call
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user
    ///
    /// The store is called at most once. A conflict never mutates the
    /// existing row, and nothing is retried here.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let id = UserId::new(request.id);
        let balance =
            Balance::new(request.balance).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = User::new(id, balance);

        match self.repository.create(&user).await {
            Ok(()) => {
                info!(user_id = %id, balance = %balance, "User created");
                Ok(user)
            }
            Err(e @ UserStoreError::DuplicateKey { .. }) => {
                warn!(user_id = %id, "User already exists");
                Err(e.into())
            }
            Err(e) => {
                error!(user_id = %id, error = %e, "User creation failed");
                Err(e.into())
            }
        }
    }

    /// Check that the underlying store is reachable
    pub async fn check_store(&self) -> Result<(), DomainError> {
        Ok(self.repository.ping().await?)
    }
}
