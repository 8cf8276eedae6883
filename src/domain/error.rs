use thiserror::Error;

use crate::domain::user::{UserId, UserStoreError};

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("User {id} already exists")]
    UserExists { id: UserId },

    #[error("Storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<UserStoreError>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<UserStoreError>,
    },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn user_exists(id: UserId) -> Self {
        Self::UserExists { id }
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
}

impl From<UserStoreError> for DomainError {
    fn from(err: UserStoreError) -> Self {
        match &err {
            UserStoreError::DuplicateKey { id } => Self::user_exists(*id),
            UserStoreError::Unavailable { message, .. } => Self::Unavailable {
                message: message.clone(),
                source: Some(err.clone()),
            },
            UserStoreError::Storage { message, .. } => Self::Storage {
                message: message.clone(),
                source: Some(err.clone()),
            },
        }
    }
}
