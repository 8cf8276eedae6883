//! Classified outcomes of user store operations

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use super::entity::UserId;

/// Driver error kept behind a store error
pub type StoreCause = Arc<dyn StdError + Send + Sync + 'static>;

/// Errors reported by a [`UserRepository`](super::UserRepository)
///
/// Backends classify their driver errors into these kinds; callers branch
/// on the kind, and the driver error stays reachable through `source()`.
#[derive(Debug, Error, Clone)]
pub enum UserStoreError {
    /// A row with this id already exists
    #[error("User {id} already exists")]
    DuplicateKey { id: UserId },

    /// The store could not be reached or did not answer in time
    #[error("Storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<StoreCause>,
    },

    /// Any other storage failure
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<StoreCause>,
    },
}

impl UserStoreError {
    pub fn duplicate_key(id: UserId) -> Self {
        Self::DuplicateKey { id }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    pub fn unavailable_caused_by<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Unavailable {
            message: message.into(),
            source: Some(Arc::new(cause)),
        }
    }

    pub fn storage_caused_by<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: Some(Arc::new(cause)),
        }
    }

    /// Whether a caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::DuplicateKey { .. })
    }
}

/// Equality compares the kind and message; causes are not comparable
impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateKey { id: a }, Self::DuplicateKey { id: b }) => a == b,
            (Self::Unavailable { message: a, .. }, Self::Unavailable { message: b, .. }) => a == b,
            (Self::Storage { message: a, .. }, Self::Storage { message: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for UserStoreError {}
