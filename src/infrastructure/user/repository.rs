//! In-memory user store implementation

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository, UserStoreError};

/// In-memory implementation of UserRepository
///
/// The id check and the insertion happen under one write lock, which gives
/// the same insert-or-reject atomicity as a unique constraint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users.into_iter().map(|u| (u.id(), u)).collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;

        match users.entry(user.id()) {
            Entry::Occupied(_) => Err(UserStoreError::duplicate_key(user.id())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Ok(())
    }
}
