//! User repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::fmt::Debug;

use super::entity::{User, UserId};
use super::error::UserStoreError;

/// Repository trait for user storage
///
/// Uniqueness of `id` is enforced by the backend itself: `create` must
/// insert-or-reject in one atomic step, never read then write.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new user, failing with `DuplicateKey` if the id is taken
    async fn create(&self, user: &User) -> Result<(), UserStoreError>;

    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), UserStoreError>;
}
