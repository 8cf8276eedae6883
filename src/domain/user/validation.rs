//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Balance cannot be negative, got {0}")]
    NegativeBalance(i64),
}

/// Validate a balance amount
///
/// Zero is a valid opening balance.
pub fn validate_balance(amount: i64) -> Result<(), UserValidationError> {
    if amount < 0 {
        return Err(UserValidationError::NegativeBalance(amount));
    }

    Ok(())
}
