//! User endpoint request types

use serde::{Deserialize, Serialize};

use crate::infrastructure::user::CreateUserRequest;

/// Body of `POST /v1/user/create`
///
/// Both fields are required integers; anything else is rejected while
/// decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserApiRequest {
    pub id: i64,
    pub balance: i64,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            id: request.id,
            balance: request.balance,
        }
    }
}
